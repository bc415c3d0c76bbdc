pub mod extractor;

pub use extractor::{DefaultExtractor, TextExtractor};

use std::sync::Arc;

use crate::db::traits::DatabaseBackend;
use crate::error::Result;
use crate::models::{DocumentCategory, HrDocument};

/// Stores uploaded files as knowledge-base documents.
pub struct DocumentIngestor {
    db: Arc<dyn DatabaseBackend>,
    extractor: Arc<dyn TextExtractor>,
}

impl DocumentIngestor {
    pub fn new(db: Arc<dyn DatabaseBackend>) -> Self {
        Self {
            db,
            extractor: Arc::new(DefaultExtractor::new()),
        }
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub async fn ingest(
        &self,
        bytes: &[u8],
        filename: &str,
        mime: &str,
        title: Option<&str>,
        version: Option<&str>,
    ) -> Result<HrDocument> {
        let content = self.extractor.extract(bytes, filename, mime)?;

        let title = title
            .filter(|t| !t.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| title_from_filename(filename));

        let document = HrDocument::new(
            title,
            content,
            guess_category(filename),
            version.unwrap_or("1.0").to_string(),
            derive_tags(filename),
        );

        self.db.create_hr_document(&document).await?;
        tracing::info!(
            document_id = %document.id,
            filename = %filename,
            category = %document.category,
            "Ingested document"
        );

        Ok(document)
    }
}

fn title_from_filename(filename: &str) -> String {
    let stem = filename.rsplit_once('.').map_or(filename, |(s, _)| s);
    let cleaned: String = stem
        .chars()
        .map(|c| if c == '_' || c == '-' { ' ' } else { c })
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        filename.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Lowercase filename words longer than two characters, deduplicated.
fn derive_tags(filename: &str) -> Vec<String> {
    let stem = filename.rsplit_once('.').map_or(filename, |(s, _)| s);
    let mut tags = Vec::new();
    for word in stem
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > 2)
    {
        if !tags.iter().any(|t| t == word) {
            tags.push(word.to_string());
        }
    }
    tags
}

fn guess_category(filename: &str) -> DocumentCategory {
    let lower = filename.to_lowercase();
    if lower.contains("handbook") {
        DocumentCategory::Handbook
    } else if lower.contains("policy") || lower.contains("policies") {
        DocumentCategory::Policy
    } else if lower.contains("benefit") {
        DocumentCategory::Benefits
    } else {
        DocumentCategory::Document
    }
}
