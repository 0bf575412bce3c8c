//! Application state for Axum handlers.

use roster_config::StatusPolicy;
use roster_service::UserService;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub status_policy: StatusPolicy,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(user_service: Arc<dyn UserService>, status_policy: StatusPolicy) -> Self {
        Self {
            user_service,
            status_policy,
        }
    }
}
