use crate::pipeline::context::AssessmentContext;
use crate::pipeline::stage::AssessmentStage;
use crate::retrieval::Corpus;
use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

/// Topics queried against the corpus, in emission order
pub const QUERY_TOPICS: [&str; 3] = ["pm25", "no2", "ph"];

/// Looks up guideline texts for the fixed topic list.
///
/// Topics missing from the corpus are skipped; a partial or empty match is
/// not a failure.
pub struct RetrievalStage {
    corpus: Arc<Corpus>,
}

impl RetrievalStage {
    pub fn new(corpus: Arc<Corpus>) -> Self {
        Self { corpus }
    }
}

impl AssessmentStage for RetrievalStage {
    fn name(&self) -> &'static str {
        "retrieval"
    }

    fn execute(&self, context: &mut AssessmentContext) -> Result<()> {
        let chunks: Vec<String> = QUERY_TOPICS
            .iter()
            .filter_map(|topic| self.corpus.get(topic).map(str::to_string))
            .collect();

        debug!(
            queried = QUERY_TOPICS.len(),
            matched = chunks.len(),
            "Corpus lookup complete"
        );

        context.retrieval_chunks = chunks;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::context::AssessmentRequest;
    use chrono::Utc;
    use std::collections::HashMap;

    fn empty_context() -> AssessmentContext {
        AssessmentContext::new(AssessmentRequest::new("SITE-001", Utc::now(), HashMap::new()))
    }

    #[test]
    fn test_full_corpus_matches_all_topics_in_order() {
        let corpus = Arc::new(Corpus::who_guidelines());
        let mut context = empty_context();

        RetrievalStage::new(Arc::clone(&corpus))
            .execute(&mut context)
            .unwrap();

        assert_eq!(context.retrieval_chunks.len(), 3);
        assert_eq!(context.retrieval_chunks[0], corpus.get("pm25").unwrap());
        assert_eq!(context.retrieval_chunks[1], corpus.get("no2").unwrap());
        assert_eq!(context.retrieval_chunks[2], corpus.get("ph").unwrap());
    }

    #[test]
    fn test_partial_corpus_skips_missing_topics() {
        let mut entries = HashMap::new();
        entries.insert("ph".to_string(), "pH guidance".to_string());
        let mut context = empty_context();

        RetrievalStage::new(Arc::new(Corpus::new(entries)))
            .execute(&mut context)
            .unwrap();

        assert_eq!(context.retrieval_chunks, vec!["pH guidance".to_string()]);
    }

    #[test]
    fn test_empty_corpus_is_not_an_error() {
        let mut context = empty_context();
        RetrievalStage::new(Arc::new(Corpus::default()))
            .execute(&mut context)
            .unwrap();
        assert!(context.retrieval_chunks.is_empty());
    }
}
