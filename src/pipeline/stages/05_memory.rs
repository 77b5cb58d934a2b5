use crate::memory::HistoryStore;
use crate::pipeline::context::AssessmentContext;
use crate::pipeline::stage::AssessmentStage;
use crate::report::MemorySnapshot;
use crate::util::rounding::round_to;
use anyhow::{anyhow, Context, Result};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Appends the current air quality score to the site's history and reports
/// the updated count and running mean.
///
/// The only stage touching cross-request state; the lock is held across the
/// append-then-read sequence so count and mean always describe the same
/// history snapshot.
pub struct MemoryStage {
    store: Arc<Mutex<dyn HistoryStore>>,
}

impl MemoryStage {
    pub fn new(store: Arc<Mutex<dyn HistoryStore>>) -> Self {
        Self { store }
    }
}

impl AssessmentStage for MemoryStage {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn execute(&self, context: &mut AssessmentContext) -> Result<()> {
        let score = context
            .reasoning
            .as_ref()
            .context("reasoning output missing; reasoning must run before the memory stage")?
            .air_quality_score;
        let site_id = context.request.site_id.as_str();

        let mut store = self
            .store
            .lock()
            .map_err(|_| anyhow!("history store lock poisoned"))?;
        store.append(site_id, score);
        let history = store.history(site_id);

        let historical_count = history.len();
        let historical_air_quality_mean =
            round_to(history.iter().sum::<f64>() / historical_count as f64, 3);

        debug!(
            site = %site_id,
            historical_count,
            historical_air_quality_mean,
            "History updated"
        );

        context.memory = Some(MemorySnapshot {
            historical_count,
            historical_air_quality_mean,
        });
        Ok(())
    }
}
