//! Sensor normalization engine
//!
//! Turns a raw payload into per-canonical-sensor float readings plus
//! ingestion metadata, or rejects the request. For each sensor in the
//! registry, in declaration order:
//!
//! 1. resolve the payload key (canonical name first, then aliases)
//! 2. coerce the raw value to a float
//! 3. apply unit conversion where the resolved alias implies one
//! 4. reject values outside the hard physical range
//! 5. warn on values outside the soft operating range
//! 6. store the value rounded to 4 digits under the canonical key
//!
//! Soft-range breaches degrade the quality score proportionally; hard
//! failures abort the request. The normalizer is pure given the payload and
//! the registry.

use crate::report::{IngestionMetadata, IngestionStatus};
use crate::sensors::registry::{SensorRegistry, SensorSpec};
use crate::sensors::SensorValue;
use crate::util::rounding::round_to;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use tracing::{debug, warn};

/// NO2 parts-per-billion to µg/m³ at standard conditions
pub const NO2_PPB_TO_UGM3: f64 = 1.88;

/// Fatal ingestion errors; all abort the current request
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Required sensor absent under every accepted alias
    #[error("required sensor '{sensor}' missing from payload under every accepted alias")]
    MissingSensor { sensor: &'static str },

    /// Resolved value cannot be coerced to a float
    #[error("sensor value for '{key}' is not numeric: '{value}'")]
    InvalidValue { key: String, value: String },

    /// Value outside the hard physical range; never clamped
    #[error(
        "sensor '{sensor}' value {value} outside physical range [{hard_min}, {hard_max}] {unit}"
    )]
    PhysicallyImpossible {
        sensor: &'static str,
        value: f64,
        hard_min: f64,
        hard_max: f64,
        unit: &'static str,
    },
}

/// Successful normalization output
#[derive(Debug, Clone)]
pub struct NormalizedReadings {
    /// Canonical name -> normalized value, rounded to 4 digits
    pub values: BTreeMap<String, f64>,
    /// Field counts, conversion notes, warnings, quality score, status
    pub metadata: IngestionMetadata,
}

/// The normalization engine; holds the immutable sensor registry
#[derive(Debug, Clone)]
pub struct SensorNormalizer {
    registry: SensorRegistry,
}

impl SensorNormalizer {
    pub fn new(registry: SensorRegistry) -> Self {
        Self { registry }
    }

    pub fn with_defaults() -> Self {
        Self::new(SensorRegistry::with_defaults())
    }

    pub fn registry(&self) -> &SensorRegistry {
        &self.registry
    }

    /// Normalizes a raw payload against the registry.
    pub fn normalize(
        &self,
        payload: &HashMap<String, SensorValue>,
    ) -> Result<NormalizedReadings, IngestionError> {
        let mut values = BTreeMap::new();
        let mut conversion_notes = BTreeMap::new();
        let mut warnings = Vec::new();
        let mut issues = 0usize;

        for spec in self.registry.specs() {
            let (key, raw) = resolve_alias(spec, payload)
                .ok_or(IngestionError::MissingSensor {
                    sensor: spec.canonical,
                })?;

            let value = raw.as_f64().ok_or_else(|| IngestionError::InvalidValue {
                key: key.to_string(),
                value: raw.to_string(),
            })?;

            let (value, note) = convert_units(spec, key, value);
            conversion_notes.insert(spec.canonical.to_string(), note);

            if !spec.in_hard_range(value) {
                return Err(IngestionError::PhysicallyImpossible {
                    sensor: spec.canonical,
                    value,
                    hard_min: spec.hard_min,
                    hard_max: spec.hard_max,
                    unit: spec.unit,
                });
            }

            if !spec.in_soft_range(value) {
                let warning = format!(
                    "{} value {} outside operating range [{}, {}] {}",
                    spec.canonical, value, spec.min_value, spec.max_value, spec.unit
                );
                warn!(sensor = spec.canonical, value, "Soft range breach");
                warnings.push(warning);
                issues += 1;
            }

            values.insert(spec.canonical.to_string(), round_to(value, 4));
        }

        let quality_score = round_to(
            (1.0 - issues as f64 / self.registry.len() as f64).max(0.0),
            4,
        );
        let status = if warnings.is_empty() {
            IngestionStatus::Pass
        } else {
            IngestionStatus::PassWithWarnings
        };

        debug!(
            sensors = values.len(),
            warnings = warnings.len(),
            quality_score,
            "Normalization complete"
        );

        Ok(NormalizedReadings {
            values,
            metadata: IngestionMetadata {
                source_field_count: payload.len(),
                required_sensor_count: self.registry.len(),
                conversion_notes,
                warnings,
                quality_score,
                status,
            },
        })
    }
}

impl Default for SensorNormalizer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Scans the spec's aliases in priority order; first payload hit wins.
fn resolve_alias<'a>(
    spec: &SensorSpec,
    payload: &'a HashMap<String, SensorValue>,
) -> Option<(&'a str, &'a SensorValue)> {
    spec.aliases
        .iter()
        .find_map(|alias| payload.get_key_value(*alias))
        .map(|(key, value)| (key.as_str(), value))
}

/// Applies unit conversion implied by the resolved alias. Only NO2 supplied
/// in parts-per-billion is converted today; every sensor still gets a note.
fn convert_units(spec: &SensorSpec, resolved_key: &str, value: f64) -> (f64, String) {
    if spec.canonical == "no2" && resolved_key == "no2_ppb" {
        let converted = value * NO2_PPB_TO_UGM3;
        let note = format!(
            "no2: converted {} ppb to {} µg/m³ (factor {})",
            value, converted, NO2_PPB_TO_UGM3
        );
        (converted, note)
    } else {
        let note = format!(
            "{}: accepted from '{}' as {} without conversion",
            spec.canonical, resolved_key, spec.unit
        );
        (value, note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    fn payload(entries: &[(&str, SensorValue)]) -> HashMap<String, SensorValue> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn valid_payload() -> HashMap<String, SensorValue> {
        payload(&[
            ("pm25", 38.0.into()),
            ("pm10", 62.0.into()),
            ("no2", 17.0.into()),
            ("ph", 7.3.into()),
            ("temperature_c", 31.2.into()),
        ])
    }

    #[test]
    fn test_valid_payload_yields_five_canonical_keys() {
        let normalizer = SensorNormalizer::with_defaults();
        let readings = normalizer.normalize(&valid_payload()).unwrap();

        let keys: Vec<&str> = readings.values.keys().map(String::as_str).collect();
        assert_eq!(keys, ["no2", "ph", "pm10", "pm25", "temperature_c"]);
        assert_eq!(readings.metadata.status, IngestionStatus::Pass);
        assert_eq!(readings.metadata.quality_score, 1.0);
        assert_eq!(readings.metadata.source_field_count, 5);
        assert_eq!(readings.metadata.required_sensor_count, 5);
        assert!(readings.metadata.warnings.is_empty());
    }

    #[parameterized(
        pm25_underscore = { "pm25", "pm2_5", 38.0 },
        pm25_suffixed = { "pm25", "pm25_ugm3", 38.0 },
        pm10_suffixed = { "pm10", "pm10_ugm3", 62.0 },
        no2_ugm3 = { "no2", "no2_ugm3", 17.0 },
        ph_level = { "ph", "ph_level", 7.3 },
        temp_short = { "temperature_c", "temp_c", 31.2 },
        temp_long = { "temperature_c", "temperature", 31.2 },
    )]
    fn test_alias_resolution(canonical: &str, alias: &str, value: f64) {
        let mut data = valid_payload();
        data.remove(canonical);
        data.insert(alias.to_string(), value.into());

        let normalizer = SensorNormalizer::with_defaults();
        let readings = normalizer.normalize(&data).unwrap();
        assert_eq!(readings.values[canonical], value);
    }

    #[test]
    fn test_canonical_key_wins_over_alias() {
        let mut data = valid_payload();
        data.insert("pm2_5".to_string(), 99.0.into());

        let normalizer = SensorNormalizer::with_defaults();
        let readings = normalizer.normalize(&data).unwrap();
        assert_eq!(readings.values["pm25"], 38.0);
    }

    #[test]
    fn test_no2_ppb_converts_exactly() {
        let mut data = valid_payload();
        data.remove("no2");
        data.insert("no2_ppb".to_string(), 10.0.into());

        let normalizer = SensorNormalizer::with_defaults();
        let readings = normalizer.normalize(&data).unwrap();
        assert_eq!(readings.values["no2"], 18.8);

        let note = &readings.metadata.conversion_notes["no2"];
        assert!(note.contains("ppb"), "note should mention ppb: {}", note);
    }

    #[test]
    fn test_conversion_notes_recorded_for_every_sensor() {
        let normalizer = SensorNormalizer::with_defaults();
        let readings = normalizer.normalize(&valid_payload()).unwrap();
        assert_eq!(readings.metadata.conversion_notes.len(), 5);
    }

    #[parameterized(
        pm25 = { "pm25" },
        pm10 = { "pm10" },
        no2 = { "no2" },
        ph = { "ph" },
        temperature = { "temperature_c" },
    )]
    fn test_missing_sensor_named_in_error(canonical: &str) {
        let mut data = valid_payload();
        data.remove(canonical);

        let normalizer = SensorNormalizer::with_defaults();
        match normalizer.normalize(&data).unwrap_err() {
            IngestionError::MissingSensor { sensor } => assert_eq!(sensor, canonical),
            other => panic!("Expected MissingSensor, got {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_value_rejected() {
        let mut data = valid_payload();
        data.insert("ph".to_string(), "acidic".into());

        let normalizer = SensorNormalizer::with_defaults();
        match normalizer.normalize(&data).unwrap_err() {
            IngestionError::InvalidValue { key, value } => {
                assert_eq!(key, "ph");
                assert_eq!(value, "acidic");
            }
            other => panic!("Expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_numeric_string_coerces() {
        let mut data = valid_payload();
        data.insert("ph".to_string(), "7.3".into());

        let normalizer = SensorNormalizer::with_defaults();
        let readings = normalizer.normalize(&data).unwrap();
        assert_eq!(readings.values["ph"], 7.3);
    }

    #[test]
    fn test_hard_range_breach_rejected_not_clamped() {
        let mut data = valid_payload();
        data.insert("ph".to_string(), 20.0.into());

        let normalizer = SensorNormalizer::with_defaults();
        match normalizer.normalize(&data).unwrap_err() {
            IngestionError::PhysicallyImpossible { sensor, value, .. } => {
                assert_eq!(sensor, "ph");
                assert_eq!(value, 20.0);
            }
            other => panic!("Expected PhysicallyImpossible, got {:?}", other),
        }
    }

    #[test]
    fn test_soft_range_breach_warns_and_continues() {
        let mut data = valid_payload();
        data.insert("pm25".to_string(), 80.0.into());

        let normalizer = SensorNormalizer::with_defaults();
        let readings = normalizer.normalize(&data).unwrap();

        assert_eq!(readings.metadata.status, IngestionStatus::PassWithWarnings);
        assert_eq!(readings.metadata.warnings.len(), 1);
        assert!(readings.metadata.warnings[0].starts_with("pm25"));
        assert_eq!(readings.metadata.quality_score, 0.8);
        assert_eq!(readings.values["pm25"], 80.0);
    }

    #[parameterized(
        one_breach = { 1, 0.8 },
        two_breaches = { 2, 0.6 },
        three_breaches = { 3, 0.4 },
    )]
    fn test_quality_score_proportional_to_warning_count(breaches: usize, expected: f64) {
        let mut data = valid_payload();
        // Out-of-soft-range but physically possible values, applied in order.
        let outliers = [("pm25", 80.0), ("pm10", 150.0), ("ph", 5.5)];
        for (key, value) in outliers.iter().take(breaches) {
            data.insert(key.to_string(), (*value).into());
        }

        let normalizer = SensorNormalizer::with_defaults();
        let readings = normalizer.normalize(&data).unwrap();
        assert_eq!(readings.metadata.warnings.len(), breaches);
        assert_eq!(readings.metadata.quality_score, expected);
    }

    #[test]
    fn test_values_rounded_to_four_digits() {
        let mut data = valid_payload();
        data.insert("temperature_c".to_string(), 31.20004999.into());

        let normalizer = SensorNormalizer::with_defaults();
        let readings = normalizer.normalize(&data).unwrap();
        assert_eq!(readings.values["temperature_c"], 31.2);
    }
}
