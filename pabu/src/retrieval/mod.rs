pub mod scorer;

pub use scorer::{KeywordScorer, Scorer};

use std::sync::Arc;

use crate::config::RetrievalConfig;
use crate::db::traits::DatabaseBackend;
use crate::error::Result;
use crate::models::ScoredDocument;

/// Ranks knowledge-base documents against a chat query.
///
/// Fetches twice the configured limit of most recently updated documents
/// as the candidate pool, then keyword-ranks them down to the limit.
pub struct RetrievalService {
    db: Arc<dyn DatabaseBackend>,
    scorer: Arc<dyn Scorer>,
    config: RetrievalConfig,
}

impl RetrievalService {
    pub fn new(db: Arc<dyn DatabaseBackend>, config: RetrievalConfig) -> Self {
        Self {
            db,
            scorer: Arc::new(KeywordScorer::new()),
            config,
        }
    }

    pub fn with_scorer(mut self, scorer: Arc<dyn Scorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub async fn search(&self, query: &str) -> Result<Vec<ScoredDocument>> {
        if !self.config.enabled || query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let candidates = self
            .db
            .get_recent_hr_documents((self.config.limit * 2) as u32)
            .await?;

        Ok(self.scorer.rank(query, candidates, self.config.limit))
    }

    /// Search that never fails the caller. Retrieval problems degrade the
    /// answer, they do not block it.
    pub async fn search_best_effort(&self, query: &str) -> Vec<ScoredDocument> {
        match self.search(query).await {
            Ok(results) => results,
            Err(error) => {
                tracing::warn!(error = %error, "Document retrieval failed, continuing without context");
                Vec::new()
            }
        }
    }
}
