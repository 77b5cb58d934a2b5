//! Assessment request and the shared pipeline context

use crate::report::{
    AssessmentReport, EvaluationMetrics, GovernanceDecision, IngestionMetadata, MemorySnapshot,
    ReasoningSummary, ReliabilitySummary, ToolOutputs,
};
use crate::sensors::SensorValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Task tag applied to requests built without an explicit one
pub const DEFAULT_TASK: &str = "environmental_assessment";

fn default_task() -> String {
    DEFAULT_TASK.to_string()
}

/// Immutable input to one assessment run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentRequest {
    /// Identifier of the monitored site
    pub site_id: String,
    /// When the readings were taken
    pub timestamp: DateTime<Utc>,
    /// Raw field name -> reading; keys may use any recognized alias
    pub sensor_data: HashMap<String, SensorValue>,
    /// Task descriptor
    #[serde(default = "default_task")]
    pub task: String,
}

impl AssessmentRequest {
    /// Creates a request with the default task tag.
    pub fn new(
        site_id: impl Into<String>,
        timestamp: DateTime<Utc>,
        sensor_data: HashMap<String, SensorValue>,
    ) -> Self {
        Self {
            site_id: site_id.into(),
            timestamp,
            sensor_data,
            task: default_task(),
        }
    }

    /// Overrides the task tag.
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = task.into();
        self
    }
}

/// Mutable accumulator threaded through the pipeline stages
///
/// Each field is written by exactly one stage and read by later ones. The
/// context is created at request entry, passed by exclusive reference
/// through every stage in order, and either discarded or kept by the caller
/// for inspection once the report has been extracted.
#[derive(Debug, Clone)]
pub struct AssessmentContext {
    pub request: AssessmentRequest,
    /// Canonical sensor name -> normalized value (ingestion stage)
    pub normalized_data: BTreeMap<String, f64>,
    /// Ingestion stage
    pub ingestion: Option<IngestionMetadata>,
    /// Retrieval stage, in topic-query order
    pub retrieval_chunks: Vec<String>,
    /// Reasoning stage
    pub reasoning: Option<ReasoningSummary>,
    /// Tool stage
    pub tool_outputs: Option<ToolOutputs>,
    /// Memory stage
    pub memory: Option<MemorySnapshot>,
    /// Evaluation stage
    pub evaluation: Option<EvaluationMetrics>,
    /// Reliability stage
    pub reliability: Option<ReliabilitySummary>,
    /// Governance stage
    pub governance: Option<GovernanceDecision>,
    /// Assemble stage
    pub report: Option<AssessmentReport>,
}

impl AssessmentContext {
    pub fn new(request: AssessmentRequest) -> Self {
        Self {
            request,
            normalized_data: BTreeMap::new(),
            ingestion: None,
            retrieval_chunks: Vec::new(),
            reasoning: None,
            tool_outputs: None,
            memory: None,
            evaluation: None,
            reliability: None,
            governance: None,
            report: None,
        }
    }

    /// Extracts the assembled report, consuming the context.
    pub fn into_report(self) -> Option<AssessmentReport> {
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_task() {
        let request = AssessmentRequest::new("SITE-001", Utc::now(), HashMap::new());
        assert_eq!(request.task, "environmental_assessment");
    }

    #[test]
    fn test_request_task_override() {
        let request = AssessmentRequest::new("SITE-001", Utc::now(), HashMap::new())
            .with_task("compliance_audit");
        assert_eq!(request.task, "compliance_audit");
    }

    #[test]
    fn test_request_deserializes_without_task() {
        let json = r#"{
            "site_id": "SITE-001",
            "timestamp": "2026-08-30T00:00:00Z",
            "sensor_data": {"pm25": 38, "ph": "7.3"}
        }"#;
        let request: AssessmentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.task, "environmental_assessment");
        assert_eq!(request.sensor_data.len(), 2);
    }

    #[test]
    fn test_fresh_context_has_no_stage_output() {
        let context =
            AssessmentContext::new(AssessmentRequest::new("SITE-001", Utc::now(), HashMap::new()));
        assert!(context.normalized_data.is_empty());
        assert!(context.ingestion.is_none());
        assert!(context.report.is_none());
        assert!(context.into_report().is_none());
    }
}
