//! v1 Conversation handlers. Read-only: conversations are written by the
//! chat pipeline, never directly.

use axum::extract::{Path, Query, State};

use crate::api::v1::dto::conversations::{
    ConversationResponse, ConversationSummaryResponse, ListConversationsQuery,
    ListConversationsResponse,
};
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;

const DEFAULT_LIST_LIMIT: u32 = 20;

/// `GET /api/v1/conversations?userId=`
#[utoipa::path(
    get,
    path = "/api/v1/conversations",
    tag = "conversations",
    operation_id = "conversations.list",
    responses(
        (status = 200, description = "Conversations, most recently active first", body = ListConversationsResponse),
    )
)]
pub async fn list_conversations(
    State(state): State<AppState>,
    Query(query): Query<ListConversationsQuery>,
) -> ApiResponse<ListConversationsResponse> {
    let limit = query.limit.unwrap_or(DEFAULT_LIST_LIMIT).min(100);

    match state.db.list_conversations(&query.user_id, limit).await {
        Ok(conversations) => ApiResponse::success(ListConversationsResponse {
            conversations: conversations
                .into_iter()
                .map(ConversationSummaryResponse::from)
                .collect(),
        }),
        Err(error) => ApiResponse::from_error(&error),
    }
}

/// `GET /api/v1/conversations/{conversationId}`
#[utoipa::path(
    get,
    path = "/api/v1/conversations/{conversationId}",
    tag = "conversations",
    operation_id = "conversations.get",
    params(("conversationId" = String, Path, description = "Conversation id")),
    responses(
        (status = 200, description = "Conversation with full message log", body = ConversationResponse),
        (status = 404, description = "Not found", body = ApiError),
    )
)]
pub async fn get_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResponse<ConversationResponse> {
    match state.db.get_conversation(&id).await {
        Ok(Some(conversation)) => ApiResponse::success(conversation.into()),
        Ok(None) => {
            ApiResponse::error(ErrorCode::NotFound, format!("Conversation {id} not found"))
        }
        Err(error) => ApiResponse::from_error(&error),
    }
}
