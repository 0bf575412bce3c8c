//! Persisted user entity.

use roster_core::UserId;
use serde::{Deserialize, Serialize};

/// A user row as owned by the store.
///
/// `id` is `None` until the record has been saved once; the store assigns it
/// and it never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Option<UserId>,
    pub name: String,
    pub email: String,
}

impl UserRecord {
    /// Creates an unsaved record.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
        }
    }

    /// Replaces the mutable fields, keeping the id.
    pub fn replace_details(&mut self, name: impl Into<String>, email: impl Into<String>) {
        self.name = name.into();
        self.email = email.into();
    }
}
