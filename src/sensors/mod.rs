//! Sensor specification table and the normalization engine
//!
//! - [`registry`]: Immutable per-sensor specifications (aliases, operating
//!   ranges, units) for the five canonical sensors
//! - [`normalizer`]: Alias resolution, type coercion, unit conversion, and
//!   range enforcement over a raw payload

pub mod normalizer;
pub mod registry;

pub use normalizer::{IngestionError, NormalizedReadings, SensorNormalizer};
pub use registry::{SensorRegistry, SensorSpec};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw payload value: numbers arrive either as JSON numbers or as numeric
/// strings, depending on the upstream collector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SensorValue {
    /// Native numeric reading
    Number(f64),
    /// String-encoded reading, coerced during ingestion
    Text(String),
}

impl SensorValue {
    /// Attempts to coerce the value to a float.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SensorValue::Number(n) => Some(*n),
            SensorValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for SensorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorValue::Number(n) => write!(f, "{}", n),
            SensorValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for SensorValue {
    fn from(value: f64) -> Self {
        SensorValue::Number(value)
    }
}

impl From<i64> for SensorValue {
    fn from(value: i64) -> Self {
        SensorValue::Number(value as f64)
    }
}

impl From<&str> for SensorValue {
    fn from(value: &str) -> Self {
        SensorValue::Text(value.to_string())
    }
}
