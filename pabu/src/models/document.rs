use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    Handbook,
    Policy,
    Benefits,
    #[default]
    Document,
}

impl std::fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Handbook => write!(f, "handbook"),
            Self::Policy => write!(f, "policy"),
            Self::Benefits => write!(f, "benefits"),
            Self::Document => write!(f, "document"),
        }
    }
}

impl std::str::FromStr for DocumentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "handbook" => Ok(Self::Handbook),
            "policy" => Ok(Self::Policy),
            "benefits" => Ok(Self::Benefits),
            "document" => Ok(Self::Document),
            _ => Err(format!("Unknown document category: {s}")),
        }
    }
}

/// An HR knowledge-base document. Content is immutable once ingested except
/// through an explicit edit; tags are derived from the filename at ingest and
/// editable afterward. Deletes are hard deletes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HrDocument {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: DocumentCategory,
    /// Informal semver-like marker, e.g. "v2" or "2.1".
    pub version: String,
    /// Lowercase tags; matched case-insensitively by the scorer.
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HrDocument {
    pub fn new(
        title: String,
        content: String,
        category: DocumentCategory,
        version: String,
        tags: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: nanoid::nanoid!(),
            title,
            content,
            category,
            version,
            tags,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A document paired with its relevance score for one query. Ephemeral:
/// exists only within a single retrieval call, never persisted.
#[derive(Debug, Clone)]
pub struct ScoredDocument {
    pub document: HrDocument,
    pub score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ListHrDocumentsRequest {
    pub category: Option<DocumentCategory>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
    pub order: Option<String>,
    pub sort: Option<String>,
}

/// List-view projection without the full content body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HrDocumentSummary {
    pub id: String,
    pub title: String,
    pub category: DocumentCategory,
    pub version: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<HrDocument> for HrDocumentSummary {
    fn from(doc: HrDocument) -> Self {
        Self {
            id: doc.id,
            title: doc.title,
            category: doc.category,
            version: doc.version,
            tags: doc.tags,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}
