use crate::pipeline::context::AssessmentContext;
use crate::pipeline::stage::AssessmentStage;
use crate::report::EvaluationMetrics;
use crate::util::rounding::round_to;
use anyhow::{Context, Result};
use tracing::debug;

/// Chunk count at which retrieval is considered fully accurate
const FULL_RETRIEVAL_CHUNKS: usize = 3;

const PARTIAL_RETRIEVAL_ACCURACY: f64 = 0.6;
const PARTIAL_REASONING_CONSISTENCY: f64 = 0.5;

/// Expected calibration error scale factor
const ECE_SCALE: f64 = 0.1;

/// Derives fixed-rule proxy metrics from the upstream stage outputs.
pub struct EvaluationStage;

impl AssessmentStage for EvaluationStage {
    fn name(&self) -> &'static str {
        "evaluation"
    }

    fn execute(&self, context: &mut AssessmentContext) -> Result<()> {
        let reasoning = context
            .reasoning
            .as_ref()
            .context("reasoning output missing; reasoning must run before evaluation")?;
        let tools = context
            .tool_outputs
            .as_ref()
            .context("tool outputs missing; tool stage must run before evaluation")?;

        let retrieval_accuracy = if context.retrieval_chunks.len() >= FULL_RETRIEVAL_CHUNKS {
            1.0
        } else {
            PARTIAL_RETRIEVAL_ACCURACY
        };

        let reasoning_consistency = if reasoning.explanation.is_empty() {
            PARTIAL_REASONING_CONSISTENCY
        } else {
            1.0
        };

        // max >= mean holds for any non-empty reading set, so this never
        // fires in practice. Kept because the published metric contract
        // defines tool_correctness this way.
        let tool_correctness = if tools.max_sensor_value >= tools.mean_sensor_value {
            1.0
        } else {
            0.0
        };

        let ece = round_to(
            (reasoning.air_quality_score / 100.0 - retrieval_accuracy).abs() * ECE_SCALE,
            4,
        );

        debug!(
            retrieval_accuracy,
            reasoning_consistency, tool_correctness, ece, "Evaluation complete"
        );

        context.evaluation = Some(EvaluationMetrics {
            retrieval_accuracy: round_to(retrieval_accuracy, 3),
            reasoning_consistency: round_to(reasoning_consistency, 3),
            tool_correctness: round_to(tool_correctness, 3),
            ece,
        });
        Ok(())
    }
}
