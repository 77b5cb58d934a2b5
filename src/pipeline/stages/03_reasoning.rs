use crate::pipeline::context::AssessmentContext;
use crate::pipeline::stage::AssessmentStage;
use crate::report::{ReasoningSummary, WaterStatus};
use crate::util::rounding::round_to;
use anyhow::{Context, Result};
use tracing::debug;

/// Linear penalty weights for the air quality model. Not physically
/// calibrated; part of the published scoring contract.
const PM25_WEIGHT: f64 = 1.2;
const NO2_WEIGHT: f64 = 0.6;

const PH_NORMAL_MIN: f64 = 6.5;
const PH_NORMAL_MAX: f64 = 8.5;

/// Fixed explanation emitted with every summary
pub const EXPLANATION: &str = "Combined particulate and NO2 loading with pH threshold checks.";

/// Derives the air quality score and water status from normalized readings.
pub struct ReasoningStage;

impl AssessmentStage for ReasoningStage {
    fn name(&self) -> &'static str {
        "reasoning"
    }

    fn execute(&self, context: &mut AssessmentContext) -> Result<()> {
        let pm25 = *context
            .normalized_data
            .get("pm25")
            .context("pm25 missing from normalized data; ingestion must run first")?;
        let no2 = *context
            .normalized_data
            .get("no2")
            .context("no2 missing from normalized data; ingestion must run first")?;
        let ph = *context
            .normalized_data
            .get("ph")
            .context("ph missing from normalized data; ingestion must run first")?;

        let penalty = pm25 * PM25_WEIGHT + no2 * NO2_WEIGHT;
        let air_quality_score = round_to((100.0 - penalty).clamp(0.0, 100.0), 2);

        let water_status = if (PH_NORMAL_MIN..=PH_NORMAL_MAX).contains(&ph) {
            WaterStatus::Normal
        } else {
            WaterStatus::Attention
        };

        debug!(air_quality_score, water_status = %water_status, "Reasoning complete");

        context.reasoning = Some(ReasoningSummary {
            air_quality_score,
            water_status,
            explanation: EXPLANATION.to_string(),
        });
        Ok(())
    }
}
