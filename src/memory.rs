//! Per-site score history
//!
//! The one piece of state shared across requests: an append-only sequence of
//! air quality scores per site. The store is injected into the orchestrator
//! behind the [`HistoryStore`] trait so it can be swapped for a bounded or
//! persistent implementation without touching pipeline logic.
//!
//! History grows monotonically and is never pruned; bounding growth is left
//! to a future eviction policy.

use std::collections::HashMap;

/// Append-then-read interface over per-site score history
///
/// Callers that process concurrent requests for the same site must hold one
/// lock across the append-then-read sequence; the orchestrator wraps the
/// store in a `Mutex` for exactly that reason.
pub trait HistoryStore: Send {
    /// Appends a score to the site's history.
    fn append(&mut self, site_id: &str, value: f64);

    /// Returns the site's full history, oldest first. Empty if the site has
    /// never been assessed.
    fn history(&self, site_id: &str) -> &[f64];
}

/// Default in-memory implementation
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    entries: HashMap<String, Vec<f64>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct sites with recorded history.
    pub fn site_count(&self) -> usize {
        self.entries.len()
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn append(&mut self, site_id: &str, value: f64) {
        self.entries
            .entry(site_id.to_string())
            .or_default()
            .push(value);
    }

    fn history(&self, site_id: &str) -> &[f64] {
        self.entries
            .get(site_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
