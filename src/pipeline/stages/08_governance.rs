use crate::pipeline::context::AssessmentContext;
use crate::pipeline::stage::AssessmentStage;
use crate::report::GovernanceDecision;
use anyhow::{Context, Result};
use tracing::warn;

/// PM2.5 concentration above which publication is blocked
const PM25_ALERT_THRESHOLD: f64 = 55.0;

/// pH band outside which publication is blocked
const PH_ALERT_MIN: f64 = 6.0;
const PH_ALERT_MAX: f64 = 9.0;

const PM25_ALERT: &str = "PM2.5 exceeds governance threshold";
const PH_ALERT: &str = "pH outside safe governance range";

/// Stateless rule check over the normalized readings; rules fire in
/// declaration order (PM2.5 before pH).
pub struct GovernanceStage;

impl AssessmentStage for GovernanceStage {
    fn name(&self) -> &'static str {
        "governance"
    }

    fn execute(&self, context: &mut AssessmentContext) -> Result<()> {
        let pm25 = *context
            .normalized_data
            .get("pm25")
            .context("pm25 missing from normalized data; ingestion must run first")?;
        let ph = *context
            .normalized_data
            .get("ph")
            .context("ph missing from normalized data; ingestion must run first")?;

        let mut alerts = Vec::new();
        if pm25 > PM25_ALERT_THRESHOLD {
            warn!(site = %context.request.site_id, pm25, "Governance alert: PM2.5");
            alerts.push(PM25_ALERT.to_string());
        }
        if ph < PH_ALERT_MIN || ph > PH_ALERT_MAX {
            warn!(site = %context.request.site_id, ph, "Governance alert: pH");
            alerts.push(PH_ALERT.to_string());
        }

        let safe_to_publish = alerts.is_empty();
        context.governance = Some(GovernanceDecision {
            alerts,
            safe_to_publish,
        });
        Ok(())
    }
}
