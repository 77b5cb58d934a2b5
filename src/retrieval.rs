//! Guideline corpus lookup
//!
//! A read-only mapping from topic key to guideline text, supplied when the
//! orchestrator is constructed. The retrieval stage queries a fixed topic
//! list against it; topics absent from the corpus are skipped, never an
//! error.

use std::collections::HashMap;

/// Read-only topic -> guideline text table
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    entries: HashMap<String, String>,
}

impl Corpus {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    /// Builds the default corpus of WHO guideline snippets.
    pub fn who_guidelines() -> Self {
        let mut entries = HashMap::new();
        entries.insert(
            "pm25".to_string(),
            "WHO PM2.5 guideline: annual mean under 5 µg/m3 where feasible.".to_string(),
        );
        entries.insert(
            "no2".to_string(),
            "WHO NO2 guideline: annual average under 10 µg/m3.".to_string(),
        );
        entries.insert(
            "ph".to_string(),
            "Surface water pH is typically acceptable in range 6.5-8.5.".to_string(),
        );
        Self { entries }
    }

    pub fn get(&self, topic: &str) -> Option<&str> {
        self.entries.get(topic).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<HashMap<String, String>> for Corpus {
    fn from(entries: HashMap<String, String>) -> Self {
        Self::new(entries)
    }
}
