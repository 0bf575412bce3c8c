//! Presence and email-format checks for user input.

use crate::dto::User;
use roster_core::{RosterResult, ValidateExt};

/// Checks that name and email are present and the email is well formed.
///
/// A missing field is reported ahead of a malformed email.
pub fn validate_user(user: &User) -> RosterResult<()> {
    user.validate_request()
}
