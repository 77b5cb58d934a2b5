use crate::pipeline::context::AssessmentContext;
use crate::pipeline::stage::AssessmentStage;
use crate::sensors::normalizer::SensorNormalizer;
use anyhow::Result;
use tracing::debug;

/// Validates and normalizes the raw payload via the sensor normalizer.
///
/// The only stage with defined failure semantics: any `IngestionError`
/// aborts the request before scoring begins.
pub struct IngestionStage {
    normalizer: SensorNormalizer,
}

impl IngestionStage {
    pub fn new(normalizer: SensorNormalizer) -> Self {
        Self { normalizer }
    }

    pub fn with_defaults() -> Self {
        Self::new(SensorNormalizer::with_defaults())
    }
}

impl AssessmentStage for IngestionStage {
    fn name(&self) -> &'static str {
        "ingestion"
    }

    fn execute(&self, context: &mut AssessmentContext) -> Result<()> {
        let readings = self.normalizer.normalize(&context.request.sensor_data)?;

        debug!(
            site = %context.request.site_id,
            sensors = readings.values.len(),
            status = %readings.metadata.status,
            "Payload normalized"
        );

        context.normalized_data = readings.values;
        context.ingestion = Some(readings.metadata);
        Ok(())
    }
}
