use super::context::AssessmentContext;
use anyhow::Result;

/// One step of the assessment pipeline.
///
/// Stages run synchronously in the orchestrator's fixed order; each writes
/// its own context fields and reads only what earlier stages produced. A
/// stage error aborts the remaining stages.
pub trait AssessmentStage: Send + Sync {
    fn name(&self) -> &'static str;

    fn execute(&self, context: &mut AssessmentContext) -> Result<()>;
}
