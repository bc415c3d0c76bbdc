pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod response;
pub mod router;

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::api::{create_router, AppState};
    use crate::config::{ChatConfig, Config, DatabaseConfig, RetrievalConfig, ServerConfig};

    async fn test_state(api_keys: Vec<String>) -> AppState {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                api_keys,
            },
            database: DatabaseConfig {
                url: ":memory:".to_string(),
                auth_token: None,
                local_path: None,
            },
            chat: ChatConfig {
                history_limit: 0,
                default_language: "en".to_string(),
            },
            retrieval: RetrievalConfig {
                enabled: true,
                limit: 10,
                excerpt_chars: 1000,
            },
            llm: None,
            roles: Default::default(),
        };

        let raw_db = crate::db::Database::new(&config.database).await.unwrap();
        let db: std::sync::Arc<dyn crate::db::DatabaseBackend> =
            std::sync::Arc::new(crate::db::LibSqlBackend::new(raw_db));
        let llm = crate::llm::LlmProvider::new(config.llm.as_ref());

        AppState::new(config, db, llm)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn protected_route_requires_auth() {
        let app = create_router(test_state(vec!["test-key".to_string()]).await);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/documents:search")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"q":"leave"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "unauthorized");
    }

    #[tokio::test]
    async fn health_is_public() {
        let app = create_router(test_state(vec!["secret".to_string()]).await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["data"]["llm"]["status"], "unavailable");
    }

    #[tokio::test]
    async fn openapi_json_is_public_and_valid() {
        let app = create_router(test_state(vec!["secret".to_string()]).await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let version = json["openapi"]
            .as_str()
            .expect("openapi field should be a string");
        assert!(
            version.starts_with("3"),
            "OpenAPI version should start with 3, got: {version}"
        );
    }

    #[tokio::test]
    async fn missing_keys_lock_down_protected_routes() {
        let app = create_router(test_state(vec![]).await);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/chat")
                    .header("content-type", "application/json")
                    .header("Authorization", "Bearer anything")
                    .body(Body::from(r#"{"userId":"u1","message":"hi"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert!(json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("PABU_API_KEYS"));
    }

    #[tokio::test]
    async fn valid_key_passes_through_to_handler() {
        let app = create_router(test_state(vec!["k1".to_string()]).await);

        // Unknown user: auth passed, handler returns not_found.
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/users/u_missing")
                    .header("Authorization", "Bearer k1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "not_found");
        assert!(json.get("data").is_none());
    }

    #[tokio::test]
    async fn leave_balance_defaults_when_absent() {
        let app = create_router(test_state(vec!["k1".to_string()]).await);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/leave/balances/u_new")
                    .header("Authorization", "Bearer k1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["defaulted"], true);
        assert_eq!(json["data"]["annual"]["available"], 20);
        assert_eq!(json["data"]["sick"]["earned"], 10);
        assert_eq!(json["data"]["emergency"]["earned"], 5);
    }
}
