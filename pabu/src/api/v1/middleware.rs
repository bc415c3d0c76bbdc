//! Bearer-key authentication for the protected v1 routes.
//!
//! Keys come from `PABU_API_KEYS`. Public routes (`/health`, `/openapi.json`,
//! `/docs`) are mounted outside this layer.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::state::AppState;

use super::response::{ApiResponse, ErrorCode};

/// Enforces `Authorization: Bearer <token>` on every request that reaches it.
/// An empty key list does not disable auth: the server starts but protected
/// routes answer 401, using the v1 JSON error envelope.
pub async fn v1_auth_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let keys = &state.config.server.api_keys;
    if keys.is_empty() {
        return unauthorized("API keys not configured. Set PABU_API_KEYS to enable access.");
    }

    match bearer_token(request.headers()) {
        Ok(token) if keys.iter().any(|key| key == token) => next.run(request).await,
        Ok(_) => unauthorized("Invalid API key"),
        Err(message) => unauthorized(message),
    }
}

fn bearer_token(headers: &HeaderMap) -> std::result::Result<&str, &'static str> {
    let header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or("Missing authorization header")?;
    header
        .strip_prefix("Bearer ")
        .ok_or("Invalid authorization header format. Expected: Bearer <token>")
}

fn unauthorized(message: &str) -> Response {
    ApiResponse::<()>::error(ErrorCode::Unauthorized, message).into_response()
}
