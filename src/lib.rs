//! sitewatch - staged assessment pipeline for environmental monitoring sites
//!
//! This library ingests raw sensor readings for a monitoring site, validates
//! and normalizes them, derives quality and reliability scores, and assembles
//! a structured assessment report. Processing is a fixed, ordered sequence of
//! stages over a shared mutable context.
//!
//! # Core Concepts
//!
//! - **Sensor Normalization**: Aliased field names are resolved against a
//!   static per-sensor specification table, units are converted, and hard and
//!   soft operating ranges are enforced before any scoring runs
//! - **Assessment Context**: A single-owner accumulator threaded through the
//!   pipeline; each stage writes its own output fields and reads only what
//!   earlier stages produced
//! - **History Store**: Per-site append-only score history shared across
//!   requests, injected so it can be replaced without touching pipeline logic
//!
//! # Example Usage
//!
//! ```
//! use sitewatch::{AssessmentRequest, Corpus, PipelineOrchestrator};
//! use chrono::Utc;
//! use std::collections::HashMap;
//!
//! fn assess() -> anyhow::Result<()> {
//!     let orchestrator = PipelineOrchestrator::new(Corpus::who_guidelines());
//!
//!     let mut sensor_data = HashMap::new();
//!     sensor_data.insert("pm25".to_string(), 38.0.into());
//!     sensor_data.insert("pm10".to_string(), 62.0.into());
//!     sensor_data.insert("no2".to_string(), 17.0.into());
//!     sensor_data.insert("ph".to_string(), 7.3.into());
//!     sensor_data.insert("temperature_c".to_string(), 31.2.into());
//!
//!     let request = AssessmentRequest::new("SITE-001", Utc::now(), sensor_data);
//!     let context = orchestrator.execute(request)?;
//!
//!     let report = context.report.expect("pipeline completed");
//!     println!("air quality: {}", report.summary.air_quality_score);
//!     Ok(())
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`sensors`]: Sensor specification table and the normalization engine
//! - [`pipeline`]: Stage trait, assessment context, and the orchestrator
//! - [`report`]: Serializable report schema with fixed top-level keys
//! - [`memory`]: Per-site score history store
//! - [`retrieval`]: Read-only guideline corpus lookup

// Public modules
pub mod config;
pub mod memory;
pub mod pipeline;
pub mod report;
pub mod retrieval;
pub mod sensors;
pub mod util;

// Re-export key types for convenient access
pub use config::{ConfigError, SitewatchConfig};
pub use memory::{HistoryStore, InMemoryHistoryStore};
pub use pipeline::context::{AssessmentContext, AssessmentRequest};
pub use pipeline::orchestrator::PipelineOrchestrator;
pub use pipeline::stage::AssessmentStage;
pub use report::AssessmentReport;
pub use retrieval::Corpus;
pub use sensors::normalizer::{IngestionError, SensorNormalizer};
pub use sensors::registry::{SensorRegistry, SensorSpec};
pub use sensors::SensorValue;
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_sitewatch() {
        assert_eq!(NAME, "sitewatch");
    }
}
