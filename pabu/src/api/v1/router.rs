use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::api::state::AppState;

use super::handlers;
use super::middleware::v1_auth_middleware;

pub fn v1_router(state: AppState) -> Router<AppState> {
    let documents = Router::new()
        .route(
            "/",
            get(handlers::documents::list_documents).post(handlers::documents::create_document),
        )
        .route(
            "/{documentId}",
            get(handlers::documents::get_document)
                .patch(handlers::documents::update_document)
                .delete(handlers::documents::delete_document),
        );

    let users = Router::new()
        .route(
            "/{userId}",
            get(handlers::users::get_user).put(handlers::users::upsert_user),
        )
        .route("/{userId}/reports", get(handlers::users::get_direct_reports));

    let leave = Router::new()
        .route(
            "/balances/{employeeId}",
            get(handlers::leave::get_balance).put(handlers::leave::put_balance),
        )
        .route(
            "/applications",
            get(handlers::leave::list_applications).post(handlers::leave::create_application),
        )
        .route(
            "/applications/{applicationId}:decide",
            post(handlers::leave::decide_application),
        )
        .route(
            "/applications/{applicationId}:cancel",
            post(handlers::leave::cancel_application),
        );

    let conversations = Router::new()
        .route("/", get(handlers::conversations::list_conversations))
        .route(
            "/{conversationId}",
            get(handlers::conversations::get_conversation),
        );

    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(super::openapi::openapi_json))
        .merge(super::openapi::redoc_router());

    let protected_routes = Router::new()
        .route("/chat", post(handlers::chat::send_chat))
        .nest("/documents", documents)
        .route(
            "/documents:upload",
            post(handlers::documents::upload_document),
        )
        .route(
            "/documents:search",
            post(handlers::documents::search_documents),
        )
        .nest("/users", users)
        .nest("/leave", leave)
        .nest("/conversations", conversations)
        .route_layer(middleware::from_fn_with_state(state, v1_auth_middleware));

    Router::new().merge(public_routes).merge(protected_routes)
}
