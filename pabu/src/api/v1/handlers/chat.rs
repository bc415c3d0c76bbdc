//! v1 Chat handler.
//!
//! Runs one full pipeline turn per request. Failures below the model call
//! degrade inside the service; only missing users, missing conversations,
//! and validation problems surface as error envelopes.

use axum::extract::State;
use tokio_util::sync::CancellationToken;
use validator::Validate;

use crate::api::v1::dto::chat::{ChatRequest, ChatResponse};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;

/// `POST /api/v1/chat`
#[utoipa::path(
    post,
    path = "/api/v1/chat",
    tag = "chat",
    operation_id = "chat.send",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 400, description = "Invalid request", body = ApiError),
        (status = 404, description = "User or conversation not found", body = ApiError),
    )
)]
pub async fn send_chat(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<ChatRequest>,
) -> ApiResponse<ChatResponse> {
    if let Err(errors) = req.validate() {
        return ApiResponse::error(ErrorCode::InvalidRequest, errors.to_string());
    }

    // One token per request; dropped with the handler on client disconnect,
    // which aborts the in-flight model call.
    let cancel = CancellationToken::new();

    match state
        .chat
        .handle_turn(
            &req.user_id,
            &req.message,
            req.conversation_id.as_deref(),
            req.language.as_deref(),
            &cancel,
        )
        .await
    {
        Ok(reply) => ApiResponse::success(reply.into()),
        Err(error) => ApiResponse::from_error(&error),
    }
}
