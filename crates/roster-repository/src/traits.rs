//! Repository trait definitions.

use crate::UserRecord;
use async_trait::async_trait;
use roster_core::{Interface, RosterResult, UserId};

/// User repository trait.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<UserRecord>>;

    /// Finds a user by exact email.
    async fn find_by_email(&self, email: &str) -> RosterResult<Option<UserRecord>>;

    /// Inserts the record when it has no id, otherwise overwrites the row with that id.
    ///
    /// Returns the stored record with its id populated.
    async fn save(&self, user: &UserRecord) -> RosterResult<UserRecord>;

    /// Checks if a user with this ID exists.
    async fn exists_by_id(&self, id: UserId) -> RosterResult<bool>;

    /// Deletes a user by ID. Returns false if nothing was removed.
    async fn delete_by_id(&self, id: UserId) -> RosterResult<bool>;

    /// Checks that the backing store is reachable.
    async fn health_check(&self) -> RosterResult<()>;
}
