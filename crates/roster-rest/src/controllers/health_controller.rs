//! Liveness and readiness probes.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

/// Body of `/health` and `/ready`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `healthy`, `ready` or `unavailable`.
    pub status: String,
    /// Crate version of the running server.
    pub version: String,
    /// Store reachability, reported by `/ready` only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
}

impl HealthResponse {
    fn new(status: &'static str, store: Option<&'static str>) -> Self {
        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            store: store.map(str::to_string),
        }
    }
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/live", get(liveness_check))
}

/// Reports that the process is up. Does not touch the store.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Process is up", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("healthy", None))
}

/// Pings the user store; 503 while it is unreachable.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Store reachable", body = HealthResponse),
        (status = 503, description = "Store unreachable", body = HealthResponse)
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    if let Err(e) = state.user_service.health_check().await {
        warn!("Store not ready: {}", e);
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse::new("unavailable", Some("down"))),
        );
    }

    (StatusCode::OK, Json(HealthResponse::new("ready", Some("up"))))
}

#[utoipa::path(
    get,
    path = "/live",
    tag = "health",
    responses((status = 200, description = "Process is alive"))
)]
pub async fn liveness_check() -> StatusCode {
    StatusCode::OK
}
