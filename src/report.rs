//! Assessment report schema data structures
//!
//! This module defines the fixed-shape output of the assessment pipeline.
//! The top-level report carries exactly eight keys: `site_id`, `summary`,
//! `ingestion`, `tool_outputs`, `evaluation`, `reliability`, `governance`,
//! and `retrieval_evidence`. Each stage of the pipeline produces one of the
//! sub-structures below; the assemble stage projects them into the report
//! once every stage has succeeded.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Ingestion outcome tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestionStatus {
    /// All sensors inside their soft operating ranges
    Pass,
    /// At least one soft-range breach was recorded
    PassWithWarnings,
}

impl fmt::Display for IngestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestionStatus::Pass => write!(f, "pass"),
            IngestionStatus::PassWithWarnings => write!(f, "pass_with_warnings"),
        }
    }
}

/// Water quality assessment band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterStatus {
    /// pH inside the normal surface-water band
    Normal,
    /// pH outside the normal band, follow-up needed
    Attention,
}

impl fmt::Display for WaterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaterStatus::Normal => write!(f, "normal"),
            WaterStatus::Attention => write!(f, "attention"),
        }
    }
}

/// Reliability status band derived from the weighted end-to-end score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliabilityBand {
    /// End-to-end score >= 0.85
    High,
    /// End-to-end score >= 0.70
    Moderate,
    /// Everything below
    Low,
}

impl fmt::Display for ReliabilityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReliabilityBand::High => write!(f, "high"),
            ReliabilityBand::Moderate => write!(f, "moderate"),
            ReliabilityBand::Low => write!(f, "low"),
        }
    }
}

/// Metadata produced by the sensor normalization step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionMetadata {
    /// Number of fields present in the raw payload
    pub source_field_count: usize,
    /// Number of canonical sensors the normalizer requires
    pub required_sensor_count: usize,
    /// Human-readable per-sensor conversion notes, keyed by canonical name
    pub conversion_notes: BTreeMap<String, String>,
    /// Soft-range breach warnings, in spec-declaration order
    pub warnings: Vec<String>,
    /// `max(0, 1 - issues/sensors)`, rounded to 4 digits
    pub quality_score: f64,
    /// `pass` or `pass_with_warnings`
    pub status: IngestionStatus,
}

/// Reasoning stage output: derived air and water assessments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasoningSummary {
    /// Linear particulate/NO2 penalty model, clamped to [0, 100], 2 digits
    pub air_quality_score: f64,
    /// `normal` iff pH lies in [6.5, 8.5]
    pub water_status: WaterStatus,
    /// Fixed explanation of the scoring model
    pub explanation: String,
}

/// Tool stage output: aggregate statistics over the normalized readings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutputs {
    /// Arithmetic mean of all normalized sensor values, 3 digits
    pub mean_sensor_value: f64,
    /// Maximum normalized sensor value, 3 digits
    pub max_sensor_value: f64,
}

/// Memory stage output: snapshot of the site's score history after append
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemorySnapshot {
    /// History length including the score recorded for this request
    pub historical_count: usize,
    /// Running mean of all recorded scores, 3 digits
    pub historical_air_quality_mean: f64,
}

/// Evaluation stage output: fixed-rule proxy metrics over upstream stages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    /// 1.0 when all three corpus topics matched, 0.6 otherwise
    pub retrieval_accuracy: f64,
    /// 1.0 when the reasoning stage emitted an explanation, 0.5 otherwise
    pub reasoning_consistency: f64,
    /// 1.0 when max >= mean over the normalized readings
    pub tool_correctness: f64,
    /// Calibration-error proxy, 4 digits
    pub ece: f64,
}

/// Reliability stage output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReliabilitySummary {
    /// Weighted combination of the evaluation metrics, 4 digits
    pub end_to_end: f64,
    /// Band derived from the unrounded weighted sum
    pub status: ReliabilityBand,
}

/// Governance stage output: threshold alerts and the publish decision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernanceDecision {
    /// Alert strings in rule-declaration order (PM2.5 rule before pH rule)
    pub alerts: Vec<String>,
    /// True iff no governance rule fired
    pub safe_to_publish: bool,
}

/// Final assessment report assembled after every stage has succeeded
///
/// Serializes to JSON with exactly these eight top-level keys; numeric
/// fields carry the rounding applied by their producing stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    /// Identifier of the monitored site
    pub site_id: String,
    /// Reasoning stage output
    pub summary: ReasoningSummary,
    /// Sensor normalization metadata
    pub ingestion: IngestionMetadata,
    /// Aggregate sensor statistics
    pub tool_outputs: ToolOutputs,
    /// Proxy evaluation metrics
    pub evaluation: EvaluationMetrics,
    /// Weighted reliability score and band
    pub reliability: ReliabilitySummary,
    /// Alerts and publish decision
    pub governance: GovernanceDecision,
    /// Corpus texts matched during retrieval, in topic order
    pub retrieval_evidence: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&IngestionStatus::PassWithWarnings).unwrap(),
            "\"pass_with_warnings\""
        );
        assert_eq!(
            serde_json::to_string(&WaterStatus::Normal).unwrap(),
            "\"normal\""
        );
        assert_eq!(
            serde_json::to_string(&ReliabilityBand::Moderate).unwrap(),
            "\"moderate\""
        );
    }

    #[test]
    fn test_status_display_matches_serialization() {
        assert_eq!(IngestionStatus::Pass.to_string(), "pass");
        assert_eq!(WaterStatus::Attention.to_string(), "attention");
        assert_eq!(ReliabilityBand::High.to_string(), "high");
    }

    #[test]
    fn test_report_top_level_keys() {
        let report = AssessmentReport {
            site_id: "SITE-001".to_string(),
            summary: ReasoningSummary {
                air_quality_score: 44.2,
                water_status: WaterStatus::Normal,
                explanation: "test".to_string(),
            },
            ingestion: IngestionMetadata {
                source_field_count: 5,
                required_sensor_count: 5,
                conversion_notes: BTreeMap::new(),
                warnings: vec![],
                quality_score: 1.0,
                status: IngestionStatus::Pass,
            },
            tool_outputs: ToolOutputs {
                mean_sensor_value: 31.1,
                max_sensor_value: 62.0,
            },
            evaluation: EvaluationMetrics {
                retrieval_accuracy: 1.0,
                reasoning_consistency: 1.0,
                tool_correctness: 1.0,
                ece: 0.0558,
            },
            reliability: ReliabilitySummary {
                end_to_end: 0.9944,
                status: ReliabilityBand::High,
            },
            governance: GovernanceDecision {
                alerts: vec![],
                safe_to_publish: true,
            },
            retrieval_evidence: vec![],
        };

        let value = serde_json::to_value(&report).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys.len(), 8);
        for key in [
            "site_id",
            "summary",
            "ingestion",
            "tool_outputs",
            "evaluation",
            "reliability",
            "governance",
            "retrieval_evidence",
        ] {
            assert!(keys.contains(&key), "missing report key: {}", key);
        }
    }
}
