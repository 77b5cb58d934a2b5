pub mod context;
pub mod orchestrator;
pub mod stage;
pub mod stages;

pub use context::{AssessmentContext, AssessmentRequest};
pub use orchestrator::PipelineOrchestrator;
pub use stage::AssessmentStage;
