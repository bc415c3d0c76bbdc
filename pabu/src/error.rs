use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PabuError {
    #[error("Database error: {0}")]
    Database(#[from] libsql::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("LLM unavailable: {0}")]
    LlmUnavailable(String),

    #[error("LLM authentication failed: {0}")]
    LlmAuth(String),

    #[error("LLM rate limit exceeded, retry after {retry_after:?} seconds")]
    LlmRateLimit { retry_after: Option<u64> },

    #[error("LLM call cancelled before completion")]
    LlmCancelled,
}

impl PabuError {
    /// True for model-call failures that a caller may retry (transport,
    /// rate limit, cancellation). Auth and validation failures are not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PabuError::Llm(_) | PabuError::LlmRateLimit { .. } | PabuError::LlmCancelled
        )
    }
}

impl IntoResponse for PabuError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            PabuError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            PabuError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            PabuError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            PabuError::Database(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            PabuError::Extraction(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            PabuError::Http(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
            PabuError::Json(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            PabuError::Io(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            PabuError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            PabuError::Llm(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            PabuError::LlmUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
            PabuError::LlmAuth(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            PabuError::LlmRateLimit { retry_after } => (
                StatusCode::TOO_MANY_REQUESTS,
                format!("LLM rate limit exceeded, retry after {retry_after:?} seconds"),
            ),
            PabuError::LlmCancelled => (StatusCode::GATEWAY_TIMEOUT, self.to_string()),
        };

        let body = Json(json!({
            "error": message,
            "code": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, PabuError>;
