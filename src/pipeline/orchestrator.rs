use super::context::{AssessmentContext, AssessmentRequest};
use super::stage::AssessmentStage;
use super::stages::{
    assemble::AssembleStage, evaluation::EvaluationStage, governance::GovernanceStage,
    ingestion::IngestionStage, memory::MemoryStage, reasoning::ReasoningStage,
    reliability::ReliabilityStage, retrieval::RetrievalStage, tool::ToolStage,
};
use crate::memory::{HistoryStore, InMemoryHistoryStore};
use crate::retrieval::Corpus;
use crate::sensors::normalizer::SensorNormalizer;
use crate::sensors::registry::SensorRegistry;
use anyhow::{Context, Result};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tracing::{debug, info};

/// Runs the fixed assessment stage sequence over one context per request.
///
/// Owns the guideline corpus, the sensor registry, and the shared per-site
/// history store. Stage order never changes: ingestion, retrieval,
/// reasoning, tool, memory, evaluation, reliability, governance, assemble.
/// A stage failure aborts the run; no partial report is produced.
pub struct PipelineOrchestrator {
    corpus: Arc<Corpus>,
    registry: SensorRegistry,
    store: Arc<Mutex<dyn HistoryStore>>,
}

impl PipelineOrchestrator {
    /// Creates an orchestrator with a fresh in-memory history store.
    pub fn new(corpus: Corpus) -> Self {
        Self::with_store(corpus, Arc::new(Mutex::new(InMemoryHistoryStore::new())))
    }

    /// Creates an orchestrator around an injected history store.
    pub fn with_store(corpus: Corpus, store: Arc<Mutex<dyn HistoryStore>>) -> Self {
        Self {
            corpus: Arc::new(corpus),
            registry: SensorRegistry::with_defaults(),
            store,
        }
    }

    /// Processes one request end to end and returns the completed context.
    pub fn execute(&self, request: AssessmentRequest) -> Result<AssessmentContext> {
        let start = Instant::now();
        info!(
            site = %request.site_id,
            task = %request.task,
            "Starting assessment pipeline"
        );

        let mut context = AssessmentContext::new(request);

        let stages: Vec<Box<dyn AssessmentStage>> = vec![
            Box::new(IngestionStage::new(SensorNormalizer::new(
                self.registry.clone(),
            ))),
            Box::new(RetrievalStage::new(Arc::clone(&self.corpus))),
            Box::new(ReasoningStage),
            Box::new(ToolStage),
            Box::new(MemoryStage::new(Arc::clone(&self.store))),
            Box::new(EvaluationStage),
            Box::new(ReliabilityStage),
            Box::new(GovernanceStage),
            Box::new(AssembleStage),
        ];

        for stage in stages {
            let stage_name = stage.name();
            debug!(stage = %stage_name, "Starting stage");

            let stage_start = Instant::now();
            stage
                .execute(&mut context)
                .with_context(|| format!("Stage {} failed", stage_name))?;

            debug!(
                stage = %stage_name,
                duration_ms = stage_start.elapsed().as_millis(),
                "Stage complete"
            );
        }

        info!(
            site = %context.request.site_id,
            total_time_ms = start.elapsed().as_millis(),
            "Assessment complete"
        );

        Ok(context)
    }
}
