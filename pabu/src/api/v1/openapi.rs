use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pabu API",
        version = "1.0.0",
        description = "Self-hostable HR assistant. REST API for chat, leave, users, and the HR knowledge base.",
    ),
    paths(
        handlers::health::health_check,
        handlers::chat::send_chat,
        handlers::documents::create_document,
        handlers::documents::upload_document,
        handlers::documents::search_documents,
        handlers::documents::get_document,
        handlers::documents::update_document,
        handlers::documents::delete_document,
        handlers::documents::list_documents,
        handlers::users::upsert_user,
        handlers::users::get_user,
        handlers::users::get_direct_reports,
        handlers::leave::get_balance,
        handlers::leave::put_balance,
        handlers::leave::create_application,
        handlers::leave::list_applications,
        handlers::leave::decide_application,
        handlers::leave::cancel_application,
        handlers::conversations::list_conversations,
        handlers::conversations::get_conversation,
    ),
    components(schemas(
        // Response envelope
        response::ErrorCode,
        response::ApiError,
        response::ResponseMeta,
        // Chat
        dto::chat::ChatRequest,
        dto::chat::ChatResponse,
        // Documents
        dto::documents::CreateDocumentRequest,
        dto::documents::UpdateDocumentRequest,
        dto::documents::UploadDocumentRequest,
        dto::documents::SearchDocumentsRequest,
        dto::documents::ListDocumentsQuery,
        dto::documents::DocumentResponse,
        dto::documents::DocumentSummaryResponse,
        dto::documents::ListDocumentsResponse,
        dto::documents::ScoredDocumentResponse,
        dto::documents::SearchDocumentsResponse,
        // Users
        dto::users::UpsertUserRequest,
        dto::users::UserResponse,
        dto::users::ListUsersResponse,
        // Leave
        dto::leave::TypeBalanceDto,
        dto::leave::LeaveBalanceResponse,
        dto::leave::PutLeaveBalanceRequest,
        dto::leave::CreateLeaveApplicationRequest,
        dto::leave::DecideLeaveApplicationRequest,
        dto::leave::LeaveApplicationResponse,
        dto::leave::ListLeaveApplicationsResponse,
        // Conversations
        dto::conversations::ConversationTurnResponse,
        dto::conversations::ConversationResponse,
        dto::conversations::ConversationSummaryResponse,
        dto::conversations::ListConversationsResponse,
        // Health (handler-local types)
        handlers::health::HealthData,
        handlers::health::DatabaseStatus,
        handlers::health::LlmStatus,
        handlers::health::RetrievalStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "chat", description = "HR assistant chat pipeline"),
        (name = "documents", description = "HR knowledge-base CRUD, upload, and ranked search"),
        (name = "users", description = "User profiles and reporting lines"),
        (name = "leave", description = "Leave balances and applications"),
        (name = "conversations", description = "Persisted chat transcripts"),
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            utoipa::openapi::security::SecurityScheme::Http(utoipa::openapi::security::Http::new(
                utoipa::openapi::security::HttpAuthScheme::Bearer,
            )),
        );
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
