//! v1 Document handlers.
//!
//! CRUD, file upload, listing, and ranked search over the HR knowledge base.
//! All responses are wrapped in [`ApiResponse`] envelopes.

use axum::extract::{Path, Query, State};
use base64::Engine;
use chrono::Utc;
use validator::Validate;

use crate::api::v1::dto::documents::{
    CreateDocumentRequest, DocumentResponse, DocumentSummaryResponse, ListDocumentsQuery,
    ListDocumentsResponse, ScoredDocumentResponse, SearchDocumentsRequest,
    SearchDocumentsResponse, UpdateDocumentRequest, UploadDocumentRequest,
};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode, ResponseMeta};
use crate::api::AppState;
use crate::models::{HrDocument, ListHrDocumentsRequest};

/// `POST /api/v1/documents`
#[utoipa::path(
    post,
    path = "/api/v1/documents",
    tag = "documents",
    operation_id = "documents.create",
    request_body = CreateDocumentRequest,
    responses(
        (status = 201, description = "Document created", body = DocumentResponse),
        (status = 400, description = "Invalid request", body = ApiError),
    )
)]
pub async fn create_document(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<CreateDocumentRequest>,
) -> ApiResponse<DocumentResponse> {
    if let Err(errors) = req.validate() {
        return ApiResponse::error(ErrorCode::InvalidRequest, errors.to_string());
    }

    let document = HrDocument::new(
        req.title,
        req.content,
        req.category.unwrap_or_default(),
        req.version.unwrap_or_else(|| "1.0".to_string()),
        req.tags
            .unwrap_or_default()
            .into_iter()
            .map(|t| t.to_lowercase())
            .collect(),
    );

    match state.db.create_hr_document(&document).await {
        Ok(()) => ApiResponse::created(document.into()),
        Err(error) => ApiResponse::from_error(&error),
    }
}

/// `GET /api/v1/documents/{documentId}`
#[utoipa::path(
    get,
    path = "/api/v1/documents/{documentId}",
    tag = "documents",
    operation_id = "documents.get",
    params(("documentId" = String, Path, description = "Document id")),
    responses(
        (status = 200, description = "Document", body = DocumentResponse),
        (status = 404, description = "Not found", body = ApiError),
    )
)]
pub async fn get_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResponse<DocumentResponse> {
    match state.db.get_hr_document(&id).await {
        Ok(Some(document)) => ApiResponse::success(document.into()),
        Ok(None) => ApiResponse::error(ErrorCode::NotFound, format!("Document {id} not found")),
        Err(error) => ApiResponse::from_error(&error),
    }
}

/// `PATCH /api/v1/documents/{documentId}`
#[utoipa::path(
    patch,
    path = "/api/v1/documents/{documentId}",
    tag = "documents",
    operation_id = "documents.update",
    params(("documentId" = String, Path, description = "Document id")),
    request_body = UpdateDocumentRequest,
    responses(
        (status = 200, description = "Updated document", body = DocumentResponse),
        (status = 404, description = "Not found", body = ApiError),
    )
)]
pub async fn update_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
    axum::Json(req): axum::Json<UpdateDocumentRequest>,
) -> ApiResponse<DocumentResponse> {
    let mut document = match state.db.get_hr_document(&id).await {
        Ok(Some(document)) => document,
        Ok(None) => {
            return ApiResponse::error(ErrorCode::NotFound, format!("Document {id} not found"))
        }
        Err(error) => return ApiResponse::from_error(&error),
    };

    if let Some(title) = req.title {
        if title.trim().is_empty() {
            return ApiResponse::error(ErrorCode::InvalidRequest, "Title cannot be empty");
        }
        document.title = title;
    }
    if let Some(content) = req.content {
        document.content = content;
    }
    if let Some(category) = req.category {
        document.category = category;
    }
    if let Some(version) = req.version {
        document.version = version;
    }
    if let Some(tags) = req.tags {
        document.tags = tags.into_iter().map(|t| t.to_lowercase()).collect();
    }
    document.updated_at = Utc::now();

    match state.db.update_hr_document(&document).await {
        Ok(()) => ApiResponse::success(document.into()),
        Err(error) => ApiResponse::from_error(&error),
    }
}

/// `DELETE /api/v1/documents/{documentId}`
#[utoipa::path(
    delete,
    path = "/api/v1/documents/{documentId}",
    tag = "documents",
    operation_id = "documents.delete",
    params(("documentId" = String, Path, description = "Document id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Not found", body = ApiError),
    )
)]
pub async fn delete_document(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResponse<serde_json::Value> {
    match state.db.delete_hr_document(&id).await {
        Ok(true) => ApiResponse::success(serde_json::json!({ "deleted": true })),
        Ok(false) => ApiResponse::error(ErrorCode::NotFound, format!("Document {id} not found")),
        Err(error) => ApiResponse::from_error(&error),
    }
}

/// `GET /api/v1/documents`
#[utoipa::path(
    get,
    path = "/api/v1/documents",
    tag = "documents",
    operation_id = "documents.list",
    responses(
        (status = 200, description = "Document list", body = ListDocumentsResponse),
    )
)]
pub async fn list_documents(
    State(state): State<AppState>,
    Query(query): Query<ListDocumentsQuery>,
) -> ApiResponse<ListDocumentsResponse> {
    let req = ListHrDocumentsRequest {
        category: query.category,
        limit: query.limit,
        page: query.page,
        order: query.order,
        sort: query.sort,
    };

    match state.db.list_hr_documents(&req).await {
        Ok((documents, pagination)) => ApiResponse::success_with_meta(
            ListDocumentsResponse {
                documents: documents
                    .into_iter()
                    .map(DocumentSummaryResponse::from)
                    .collect(),
            },
            ResponseMeta {
                current_page: Some(pagination.current_page),
                total_pages: Some(pagination.total_pages),
                total: Some(pagination.total_items as u64),
            },
        ),
        Err(error) => ApiResponse::from_error(&error),
    }
}

/// `POST /api/v1/documents:upload`
///
/// Accepts base64 file bytes. Text-like payloads are indexed verbatim;
/// binary formats are stored with a placeholder body.
#[utoipa::path(
    post,
    path = "/api/v1/documents:upload",
    tag = "documents",
    operation_id = "documents.upload",
    request_body = UploadDocumentRequest,
    responses(
        (status = 201, description = "Document created from upload", body = DocumentResponse),
        (status = 400, description = "Invalid request", body = ApiError),
    )
)]
pub async fn upload_document(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<UploadDocumentRequest>,
) -> ApiResponse<DocumentResponse> {
    if let Err(errors) = req.validate() {
        return ApiResponse::error(ErrorCode::InvalidRequest, errors.to_string());
    }

    let bytes = match base64::engine::general_purpose::STANDARD.decode(&req.content_base64) {
        Ok(bytes) => bytes,
        Err(_) => {
            return ApiResponse::error(ErrorCode::InvalidRequest, "contentBase64 is not valid base64")
        }
    };

    match state
        .ingestor
        .ingest(
            &bytes,
            &req.filename,
            req.mime_type.as_deref().unwrap_or(""),
            req.title.as_deref(),
            req.version.as_deref(),
        )
        .await
    {
        Ok(document) => ApiResponse::created(document.into()),
        Err(error) => ApiResponse::from_error(&error),
    }
}

/// `POST /api/v1/documents:search`
///
/// Ranked keyword retrieval, exposed for operators. Uses the same scorer as
/// the chat pipeline.
#[utoipa::path(
    post,
    path = "/api/v1/documents:search",
    tag = "documents",
    operation_id = "documents.search",
    request_body = SearchDocumentsRequest,
    responses(
        (status = 200, description = "Ranked results", body = SearchDocumentsResponse),
        (status = 400, description = "Invalid request", body = ApiError),
    )
)]
pub async fn search_documents(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<SearchDocumentsRequest>,
) -> ApiResponse<SearchDocumentsResponse> {
    if req.q.trim().is_empty() {
        return ApiResponse::error(ErrorCode::InvalidRequest, "Query cannot be empty");
    }

    match state.retrieval.search(&req.q).await {
        Ok(results) => {
            let mut results: Vec<ScoredDocumentResponse> =
                results.into_iter().map(ScoredDocumentResponse::from).collect();
            if let Some(limit) = req.limit {
                results.truncate(limit);
            }
            ApiResponse::success(SearchDocumentsResponse { results })
        }
        Err(error) => ApiResponse::from_error(&error),
    }
}
