use crate::pipeline::context::AssessmentContext;
use crate::pipeline::stage::AssessmentStage;
use crate::report::ToolOutputs;
use crate::util::rounding::round_to;
use anyhow::{ensure, Result};
use tracing::debug;

/// Computes aggregate statistics over the normalized readings.
pub struct ToolStage;

impl AssessmentStage for ToolStage {
    fn name(&self) -> &'static str {
        "tool"
    }

    fn execute(&self, context: &mut AssessmentContext) -> Result<()> {
        ensure!(
            !context.normalized_data.is_empty(),
            "normalized data empty; ingestion must run before the tool stage"
        );

        let values: Vec<f64> = context.normalized_data.values().copied().collect();
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let outputs = ToolOutputs {
            mean_sensor_value: round_to(mean, 3),
            max_sensor_value: round_to(max, 3),
        };
        debug!(
            mean = outputs.mean_sensor_value,
            max = outputs.max_sensor_value,
            "Sensor statistics computed"
        );

        context.tool_outputs = Some(outputs);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::context::AssessmentRequest;
    use chrono::Utc;
    use std::collections::HashMap;

    fn context_with_readings(entries: &[(&str, f64)]) -> AssessmentContext {
        let mut context =
            AssessmentContext::new(AssessmentRequest::new("SITE-001", Utc::now(), HashMap::new()));
        for (key, value) in entries {
            context.normalized_data.insert(key.to_string(), *value);
        }
        context
    }

    #[test]
    fn test_mean_and_max_over_reference_readings() {
        let mut context = context_with_readings(&[
            ("pm25", 38.0),
            ("pm10", 62.0),
            ("no2", 17.0),
            ("ph", 7.3),
            ("temperature_c", 31.2),
        ]);

        ToolStage.execute(&mut context).unwrap();

        let outputs = context.tool_outputs.unwrap();
        assert_eq!(outputs.mean_sensor_value, 31.1);
        assert_eq!(outputs.max_sensor_value, 62.0);
    }

    #[test]
    fn test_rounding_to_three_digits() {
        let mut context = context_with_readings(&[("a", 1.0), ("b", 2.0), ("c", 2.0005)]);
        ToolStage.execute(&mut context).unwrap();
        assert_eq!(context.tool_outputs.unwrap().mean_sensor_value, 1.667);
    }

    #[test]
    fn test_empty_readings_violate_pipeline_contract() {
        let mut context = context_with_readings(&[]);
        assert!(ToolStage.execute(&mut context).is_err());
    }
}
