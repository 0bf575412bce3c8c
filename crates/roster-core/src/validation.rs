//! Validation utilities.

use crate::{FieldError, RosterError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `RosterError` on failure.
    fn validate_request(&self) -> Result<(), RosterError> {
        self.validate().map_err(validation_errors_to_roster_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors.
///
/// Presence failures sort ahead of format failures, then by field name.
#[must_use]
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();

    fields.sort_by(|a, b| {
        (a.code != rules::NOT_BLANK, &a.field).cmp(&(b.code != rules::NOT_BLANK, &b.field))
    });
    fields
}

/// Converts `validator::ValidationErrors` to `RosterError`.
///
/// Only the highest-priority message is reported, so a request that is both
/// incomplete and malformed reads as incomplete.
#[must_use]
pub fn validation_errors_to_roster_error(errors: ValidationErrors) -> RosterError {
    let message = field_errors(&errors)
        .into_iter()
        .next()
        .map_or_else(|| "validation failed".to_string(), |e| e.message);

    RosterError::Validation(message)
}

/// Common validation functions.
pub mod rules {
    use regex::Regex;
    use std::sync::LazyLock;
    use validator::ValidationError;

    /// Error code emitted by [`not_blank`].
    pub const NOT_BLANK: &str = "not_blank";

    /// Error code emitted by [`valid_email`].
    pub const EMAIL: &str = "email";

    /// Accepted email shape: local part, `@`, domain, dot, alphabetic TLD of two or more.
    pub static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email pattern")
    });

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new(NOT_BLANK));
        }
        Ok(())
    }

    /// Validates that a string matches [`EMAIL_PATTERN`].
    pub fn valid_email(value: &str) -> Result<(), ValidationError> {
        if !EMAIL_PATTERN.is_match(value) {
            return Err(ValidationError::new(EMAIL));
        }
        Ok(())
    }
}
