//! Mapping of service outcomes onto HTTP responses.
//!
//! Under [`StatusPolicy::Compat`] the user endpoints keep their legacy
//! behavior: most expected failures answer 200 with a plain-text message.
//! [`StatusPolicy::Strict`] answers with conventional status codes and an
//! [`ErrorResponse`] JSON body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roster_config::StatusPolicy;
use roster_core::{ErrorResponse, RosterError, UserId};
use tracing::error;

/// Generic body for unexpected failures on create.
pub const CREATE_FAILED_MESSAGE: &str = "Error processing the request";

/// Generic body for unexpected failures on the other endpoints.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// The user endpoint that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Get,
    Update,
    Delete,
}

/// Plain-text message for a lookup or delete of a missing id.
#[must_use]
pub fn user_not_found_message(id: impl std::fmt::Display) -> String {
    format!("User not found with ID: {}", id)
}

/// Plain-text message for a successful delete.
#[must_use]
pub fn user_deleted_message(id: UserId) -> String {
    format!("User deleted successfully with ID: {}", id)
}

/// Response for a read of an id with no record.
#[must_use]
pub fn user_not_found(policy: StatusPolicy, id: UserId) -> Response {
    let message = user_not_found_message(id);
    match policy {
        StatusPolicy::Compat => (StatusCode::OK, message).into_response(),
        StatusPolicy::Strict => {
            let body = ErrorResponse::new("NOT_FOUND", message);
            (StatusCode::NOT_FOUND, Json(body)).into_response()
        }
    }
}

/// Service error bound to the endpoint and policy that render it.
#[derive(Debug)]
pub struct ApiError {
    pub error: RosterError,
    pub operation: Operation,
    pub policy: StatusPolicy,
}

impl ApiError {
    /// Creates an error for the given endpoint.
    #[must_use]
    pub fn new(error: RosterError, operation: Operation, policy: StatusPolicy) -> Self {
        Self {
            error,
            operation,
            policy,
        }
    }

    /// Status code and message for this error.
    #[must_use]
    pub fn status_and_message(&self) -> (StatusCode, String) {
        let generic = match self.operation {
            Operation::Create => CREATE_FAILED_MESSAGE,
            Operation::Get | Operation::Update | Operation::Delete => INTERNAL_ERROR_MESSAGE,
        };

        if self.error.is_unclassified() {
            return (StatusCode::INTERNAL_SERVER_ERROR, generic.to_string());
        }

        let message = match (&self.error, self.operation) {
            (RosterError::NotFound { id, .. }, Operation::Get | Operation::Delete) => {
                user_not_found_message(id)
            }
            (err, _) => err.to_string(),
        };

        let status = match self.policy {
            StatusPolicy::Strict => StatusCode::from_u16(self.error.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            StatusPolicy::Compat => match (&self.error, self.operation) {
                (RosterError::Validation(_), Operation::Update) => StatusCode::BAD_REQUEST,
                (RosterError::Validation(_) | RosterError::DuplicateEmail(_), Operation::Create)
                | (RosterError::NotFound { .. }, Operation::Update | Operation::Delete | Operation::Get) => {
                    StatusCode::OK
                }
                // Anything else was never expected from this endpoint
                _ => return (StatusCode::INTERNAL_SERVER_ERROR, generic.to_string()),
            },
        };

        (status, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            error!("{:?} failed: {}", self.operation, self.error);
        }

        match self.policy {
            StatusPolicy::Compat => (status, message).into_response(),
            StatusPolicy::Strict => {
                let code = if status.is_server_error() {
                    "INTERNAL_ERROR"
                } else {
                    self.error.error_code()
                };
                let body = ErrorResponse::new(code, message);
                (status, Json(body)).into_response()
            }
        }
    }
}

/// Result type for user handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn compat(error: RosterError, operation: Operation) -> (StatusCode, String) {
        ApiError::new(error, operation, StatusPolicy::Compat).status_and_message()
    }

    fn strict(error: RosterError, operation: Operation) -> (StatusCode, String) {
        ApiError::new(error, operation, StatusPolicy::Strict).status_and_message()
    }

    #[test]
    fn test_compat_create() {
        assert_eq!(
            compat(RosterError::validation("Invalid email address"), Operation::Create),
            (StatusCode::OK, "Invalid email address".to_string())
        );
        assert_eq!(
            compat(RosterError::duplicate_email(), Operation::Create),
            (StatusCode::OK, "Account already exists with this email".to_string())
        );
        assert_eq!(
            compat(RosterError::Database("down".to_string()), Operation::Create),
            (StatusCode::INTERNAL_SERVER_ERROR, CREATE_FAILED_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_compat_update() {
        assert_eq!(
            compat(RosterError::not_found("user", 3), Operation::Update),
            (StatusCode::OK, "No user found with ID: 3".to_string())
        );
        assert_eq!(
            compat(RosterError::validation("Invalid email address"), Operation::Update),
            (StatusCode::BAD_REQUEST, "Invalid email address".to_string())
        );
        assert_eq!(
            compat(RosterError::duplicate_email(), Operation::Update),
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_compat_delete() {
        assert_eq!(
            compat(RosterError::not_found("user", 4), Operation::Delete),
            (StatusCode::OK, "User not found with ID: 4".to_string())
        );
        assert_eq!(
            compat(RosterError::internal("boom"), Operation::Delete),
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_strict_statuses() {
        assert_eq!(
            strict(RosterError::validation("bad"), Operation::Create).0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            strict(RosterError::duplicate_email(), Operation::Create).0,
            StatusCode::CONFLICT
        );
        assert_eq!(
            strict(RosterError::not_found("user", 1), Operation::Update).0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            strict(RosterError::not_found("user", 1), Operation::Delete),
            (StatusCode::NOT_FOUND, "User not found with ID: 1".to_string())
        );
        assert_eq!(
            strict(RosterError::Database("x".to_string()), Operation::Get),
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(user_deleted_message(UserId(5)), "User deleted successfully with ID: 5");
        assert_eq!(user_not_found_message(UserId(5)), "User not found with ID: 5");
    }
}
