use crate::pipeline::context::AssessmentContext;
use crate::pipeline::stage::AssessmentStage;
use crate::report::{ReliabilityBand, ReliabilitySummary};
use crate::util::rounding::round_to;
use anyhow::{Context, Result};
use tracing::debug;

/// Contractual weights for the end-to-end reliability score
const RETRIEVAL_WEIGHT: f64 = 0.30;
const REASONING_WEIGHT: f64 = 0.35;
const TOOL_WEIGHT: f64 = 0.25;
const CALIBRATION_WEIGHT: f64 = 0.10;

/// Band thresholds, applied to the unrounded weighted sum
const HIGH_THRESHOLD: f64 = 0.85;
const MODERATE_THRESHOLD: f64 = 0.70;

/// Combines the evaluation metrics into one weighted reliability score.
pub struct ReliabilityStage;

impl AssessmentStage for ReliabilityStage {
    fn name(&self) -> &'static str {
        "reliability"
    }

    fn execute(&self, context: &mut AssessmentContext) -> Result<()> {
        let metrics = context
            .evaluation
            .as_ref()
            .context("evaluation metrics missing; evaluation must run before reliability")?;

        let end_to_end = RETRIEVAL_WEIGHT * metrics.retrieval_accuracy
            + REASONING_WEIGHT * metrics.reasoning_consistency
            + TOOL_WEIGHT * metrics.tool_correctness
            + CALIBRATION_WEIGHT * (1.0 - metrics.ece);

        let status = if end_to_end >= HIGH_THRESHOLD {
            ReliabilityBand::High
        } else if end_to_end >= MODERATE_THRESHOLD {
            ReliabilityBand::Moderate
        } else {
            ReliabilityBand::Low
        };

        debug!(end_to_end, status = %status, "Reliability computed");

        context.reliability = Some(ReliabilitySummary {
            end_to_end: round_to(end_to_end, 4),
            status,
        });
        Ok(())
    }
}
