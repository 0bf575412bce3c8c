//! Cache key generators for consistent key naming.

use roster_core::UserId;

/// Generate a cache key for a user by ID.
///
/// The key is the bare decimal id, shared with any other reader of the
/// same cache.
#[must_use]
pub fn user_by_id(id: UserId) -> String {
    id.to_string()
}
