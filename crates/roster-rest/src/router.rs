//! Main application router.

use crate::{
    controllers::{health_controller, user_controller},
    middleware::logging_middleware,
    openapi::ApiDoc,
    state::AppState,
};
use axum::{http::HeaderValue, middleware, routing::get, Router};
use roster_config::ServerConfig;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Creates the main application router.
pub fn create_router(state: AppState, server_config: &ServerConfig) -> Router {
    let cors = create_cors_layer(server_config);
    let status_policy = state.status_policy;

    let router = Router::new()
        .merge(health_controller::router())
        .nest("/api/users", user_controller::router())
        .route("/", get(root))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TimeoutLayer::new(server_config.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!(
        "Router created with /api/users ({} status policy) and Swagger UI at /swagger-ui",
        status_policy
    );
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }

    if server_config.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "Roster API"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use roster_config::StatusPolicy;
    use roster_core::{RosterError, UserId};
    use roster_repository::InMemoryUserRepository;
    use roster_service::{InMemoryCache, MockUserService, User, UserService, UserServiceImpl};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn in_memory_service() -> Arc<dyn UserService> {
        Arc::new(UserServiceImpl::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryCache::new()),
        ))
    }

    fn app(policy: StatusPolicy) -> Router {
        app_with(in_memory_service(), policy)
    }

    fn app_with(service: Arc<dyn UserService>, policy: StatusPolicy) -> Router {
        create_router(AppState::new(service, policy), &ServerConfig::default())
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, String) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    const ALICE: &str = r#"{"name":"Alice","email":"alice@example.com"}"#;

    // =========================================================================
    // compat policy
    // =========================================================================

    #[tokio::test]
    async fn test_create_returns_201_with_user() {
        let app = app(StatusPolicy::Compat);

        let (status, body) = send(&app, "POST", "/api/users", Some(ALICE)).await;

        assert_eq!(status, StatusCode::CREATED);
        let user: User = serde_json::from_str(&body).unwrap();
        assert_eq!(user, User::new("Alice", "alice@example.com").with_id(UserId(1)));
    }

    #[tokio::test]
    async fn test_create_invalid_email_is_200_with_message() {
        let app = app(StatusPolicy::Compat);

        let (status, body) = send(
            &app,
            "POST",
            "/api/users",
            Some(r#"{"name":"Alice","email":"not-an-email"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Invalid email address");
    }

    #[tokio::test]
    async fn test_create_missing_field_is_200_with_message() {
        let app = app(StatusPolicy::Compat);

        let (status, body) = send(&app, "POST", "/api/users", Some(r#"{"name":"Alice"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "User name and email cannot be null");
    }

    #[tokio::test]
    async fn test_null_fields_fail_validation() {
        let app = app(StatusPolicy::Compat);

        let (status, body) = send(
            &app,
            "POST",
            "/api/users",
            Some(r#"{"name":null,"email":"alice@example.com"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "User name and email cannot be null");

        send(&app, "POST", "/api/users", Some(ALICE)).await;
        let (status, body) = send(
            &app,
            "PUT",
            "/api/users/1",
            Some(r#"{"name":"Alice","email":null}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "User name and email cannot be null");
    }

    #[tokio::test]
    async fn test_create_duplicate_is_200_with_message() {
        let app = app(StatusPolicy::Compat);
        send(&app, "POST", "/api/users", Some(ALICE)).await;

        let (status, body) = send(&app, "POST", "/api/users", Some(ALICE)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Account already exists with this email");
    }

    #[tokio::test]
    async fn test_get_existing_and_missing() {
        let app = app(StatusPolicy::Compat);
        send(&app, "POST", "/api/users", Some(ALICE)).await;

        let (status, body) = send(&app, "GET", "/api/users/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"id":1,"name":"Alice","email":"alice@example.com"}"#);

        let (status, body) = send(&app, "GET", "/api/users/9", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "User not found with ID: 9");
    }

    #[tokio::test]
    async fn test_update_paths() {
        let app = app(StatusPolicy::Compat);
        send(&app, "POST", "/api/users", Some(ALICE)).await;

        let (status, body) = send(
            &app,
            "PUT",
            "/api/users/1",
            Some(r#"{"name":"Alice B.","email":"alice@example.com"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let user: User = serde_json::from_str(&body).unwrap();
        assert_eq!(user.name, "Alice B.");
        assert_eq!(user.id, Some(UserId(1)));

        let (status, body) = send(&app, "PUT", "/api/users/9", Some(ALICE)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "No user found with ID: 9");

        let (status, body) = send(
            &app,
            "PUT",
            "/api/users/1",
            Some(r#"{"name":"Alice","email":"nope"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Invalid email address");
    }

    #[tokio::test]
    async fn test_delete_paths() {
        let app = app(StatusPolicy::Compat);
        send(&app, "POST", "/api/users", Some(ALICE)).await;

        let (status, body) = send(&app, "DELETE", "/api/users/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "User deleted successfully with ID: 1");

        let (status, body) = send(&app, "DELETE", "/api/users/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "User not found with ID: 1");
    }

    #[tokio::test]
    async fn test_non_numeric_id_is_rejected() {
        let app = app(StatusPolicy::Compat);

        let (status, _) = send(&app, "GET", "/api/users/abc", None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_service_failures_are_500() {
        let mut service = MockUserService::new();
        service
            .expect_create()
            .returning(|_| Err(RosterError::Database("down".to_string())));
        service
            .expect_get_by_id()
            .returning(|_| Err(RosterError::Database("down".to_string())));
        service
            .expect_delete()
            .returning(|_| Err(RosterError::Database("down".to_string())));
        let app = app_with(Arc::new(service), StatusPolicy::Compat);

        let (status, body) = send(&app, "POST", "/api/users", Some(ALICE)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Error processing the request");

        let (status, body) = send(&app, "GET", "/api/users/1", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "Internal Server Error");

        let (status, _) = send(&app, "DELETE", "/api/users/1", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    // =========================================================================
    // strict policy
    // =========================================================================

    #[tokio::test]
    async fn test_strict_statuses() {
        let app = app(StatusPolicy::Strict);

        let (status, _) = send(
            &app,
            "POST",
            "/api/users",
            Some(r#"{"name":"Alice","email":"bad"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, "POST", "/api/users", Some(ALICE)).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, "POST", "/api/users", Some(ALICE)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        let error: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(error["code"], "DUPLICATE_EMAIL");

        let (status, body) = send(&app, "GET", "/api/users/9", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, r#"{"code":"NOT_FOUND","message":"User not found with ID: 9"}"#);

        let (status, _) = send(&app, "PUT", "/api/users/9", Some(ALICE)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "DELETE", "/api/users/9", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    // =========================================================================
    // ambient endpoints
    // =========================================================================

    #[tokio::test]
    async fn test_health_endpoints() {
        let app = app(StatusPolicy::Compat);

        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("healthy"));

        assert_eq!(send(&app, "GET", "/live", None).await.0, StatusCode::OK);
        assert_eq!(send(&app, "GET", "/ready", None).await.0, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ready_reports_store_outage() {
        let mut service = MockUserService::new();
        service
            .expect_health_check()
            .returning(|| Err(RosterError::Database("unreachable".to_string())));
        let app = app_with(Arc::new(service), StatusPolicy::Compat);

        let (status, _) = send(&app, "GET", "/ready", None).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let app = app(StatusPolicy::Compat);

        let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("/api/users/{id}"));
    }

    #[test]
    fn test_cors_with_explicit_origins() {
        let config = ServerConfig {
            cors_origins: vec!["https://example.com".to_string(), "not a header\n".to_string()],
            ..ServerConfig::default()
        };
        let _ = create_cors_layer(&config);
    }
}
