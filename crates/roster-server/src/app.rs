//! Application builder.

use crate::{di::AppContainer, startup};
use roster_config::AppConfig;
use roster_core::{RosterError, RosterResult};
use roster_rest::{create_router, AppState};
use std::future::Future;
use tokio::net::TcpListener;
use tracing::info;

/// Application builder for constructing the server.
pub struct AppBuilder {
    config: Option<AppConfig>,
}

impl AppBuilder {
    /// Creates a new application builder.
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Wires the components and serves until `shutdown` resolves.
    pub async fn run<F>(self, shutdown: F) -> RosterResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let config = self.config.clone().unwrap_or_default();
        let rest_addr = config.server.rest_addr();

        let listener = TcpListener::bind(&rest_addr)
            .await
            .map_err(|e| RosterError::Internal(format!("Failed to bind REST: {}", e)))?;

        self.serve(config, listener, shutdown).await
    }

    async fn serve<F>(self, config: AppConfig, listener: TcpListener, shutdown: F) -> RosterResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let container = AppContainer::build(&config).await?;
        let state = AppState::new(container.user_service(), config.server.status_policy);
        let router = create_router(state, &config.server);

        startup::print_startup_info(&config);
        if let Ok(addr) = listener.local_addr() {
            info!("Starting REST server on http://{}", addr);
        }

        let result = axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| RosterError::Internal(format!("REST server error: {}", e)));

        container.shutdown().await;
        info!("Server shutdown complete");
        result
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}
