use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{DocumentCategory, HrDocument, HrDocumentSummary, ScoredDocument};

#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest {
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    #[validate(length(min = 1, max = 10_000_000))]
    pub content: String,
    pub category: Option<DocumentCategory>,
    #[validate(length(max = 64))]
    pub version: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<DocumentCategory>,
    pub version: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// `POST /api/v1/documents:upload` request body. `contentBase64` carries the
/// file bytes; text-like payloads are indexed as-is, binary formats get a
/// placeholder body.
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadDocumentRequest {
    #[validate(length(min = 1, max = 512))]
    pub filename: String,
    pub mime_type: Option<String>,
    #[validate(length(min = 1))]
    pub content_base64: String,
    pub title: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchDocumentsRequest {
    #[validate(length(min = 1, max = 1000))]
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsQuery {
    pub category: Option<DocumentCategory>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
    /// `updated_at` (default), `created_at`, or `title`.
    pub sort: Option<String>,
    /// `asc` or `desc` (default).
    pub order: Option<String>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: DocumentCategory,
    pub version: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<HrDocument> for DocumentResponse {
    fn from(doc: HrDocument) -> Self {
        Self {
            id: doc.id,
            title: doc.title,
            content: doc.content,
            category: doc.category,
            version: doc.version,
            tags: doc.tags,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

/// List-view projection without the content body.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummaryResponse {
    pub id: String,
    pub title: String,
    pub category: DocumentCategory,
    pub version: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<HrDocumentSummary> for DocumentSummaryResponse {
    fn from(doc: HrDocumentSummary) -> Self {
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

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsResponse {
    pub documents: Vec<DocumentSummaryResponse>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoredDocumentResponse {
    pub score: u32,
    pub document: DocumentResponse,
}

impl From<ScoredDocument> for ScoredDocumentResponse {
    fn from(scored: ScoredDocument) -> Self {
        Self {
            score: scored.score,
            document: scored.document.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchDocumentsResponse {
    pub results: Vec<ScoredDocumentResponse>,
}
