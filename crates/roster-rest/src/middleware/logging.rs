//! Request logging middleware.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};

/// Emits one log line per request once the response is ready.
///
/// Server errors are logged at `warn`; everything else at `info`.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis();

    if response.status().is_server_error() {
        warn!(target: "http", %method, %path, status, elapsed_ms, "request failed");
    } else {
        info!(target: "http", %method, %path, status, elapsed_ms, "request served");
    }

    response
}
