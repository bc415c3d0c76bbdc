use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::ChatReply;

/// `POST /api/v1/chat` request body.
#[derive(Debug, Clone, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 128))]
    pub user_id: String,
    #[validate(length(min = 1, max = 32_000))]
    pub message: String,
    /// Omit to start a new conversation.
    pub conversation_id: Option<String>,
    /// ISO 639-1 code; defaults to the user's stored preference.
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub conversation_id: String,
    pub reply: String,
    pub language: String,
    /// True when the model call failed and the reply is the fallback apology.
    pub degraded: bool,
}

impl From<ChatReply> for ChatResponse {
    fn from(reply: ChatReply) -> Self {
        Self {
            conversation_id: reply.conversation_id,
            reply: reply.reply,
            language: reply.language,
            degraded: reply.degraded,
        }
    }
}
