// Pipeline stages for the staged environmental assessment workflow
//
// Each stage is self-contained: it owns its thresholds and formulas and
// touches only its own context fields. File numbering mirrors execution
// order in the orchestrator.

#[path = "01_ingestion.rs"]
pub mod ingestion;
#[path = "02_retrieval.rs"]
pub mod retrieval;
#[path = "03_reasoning.rs"]
pub mod reasoning;
#[path = "04_tool.rs"]
pub mod tool;
#[path = "05_memory.rs"]
pub mod memory;
#[path = "06_evaluation.rs"]
pub mod evaluation;
#[path = "07_reliability.rs"]
pub mod reliability;
#[path = "08_governance.rs"]
pub mod governance;
#[path = "09_assemble.rs"]
pub mod assemble;
