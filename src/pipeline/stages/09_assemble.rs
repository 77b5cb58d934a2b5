use crate::pipeline::context::AssessmentContext;
use crate::pipeline::stage::AssessmentStage;
use crate::report::AssessmentReport;
use anyhow::{Context, Result};
use tracing::debug;

/// Projects the completed context into the fixed-shape report.
///
/// Runs last; every upstream output must be present, so a missing field here
/// means the stage ordering was violated.
pub struct AssembleStage;

impl AssessmentStage for AssembleStage {
    fn name(&self) -> &'static str {
        "assemble"
    }

    fn execute(&self, context: &mut AssessmentContext) -> Result<()> {
        let report = AssessmentReport {
            site_id: context.request.site_id.clone(),
            summary: context
                .reasoning
                .clone()
                .context("reasoning output missing at assembly")?,
            ingestion: context
                .ingestion
                .clone()
                .context("ingestion metadata missing at assembly")?,
            tool_outputs: context
                .tool_outputs
                .clone()
                .context("tool outputs missing at assembly")?,
            evaluation: context
                .evaluation
                .clone()
                .context("evaluation metrics missing at assembly")?,
            reliability: context
                .reliability
                .clone()
                .context("reliability summary missing at assembly")?,
            governance: context
                .governance
                .clone()
                .context("governance decision missing at assembly")?,
            retrieval_evidence: context.retrieval_chunks.clone(),
        };

        debug!(site = %report.site_id, "Report assembled");
        context.report = Some(report);
        Ok(())
    }
}
