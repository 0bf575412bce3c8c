//! User service trait definition.

use crate::dto::User;
use async_trait::async_trait;
use roster_core::{Interface, RosterResult, UserId};

/// User service trait.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Validates, checks email uniqueness, persists, then caches the new user.
    async fn create(&self, candidate: User) -> RosterResult<User>;

    /// Cache-aside read. `Ok(None)` when no record has this id.
    async fn get_by_id(&self, id: UserId) -> RosterResult<Option<User>>;

    /// Replaces name and email on an existing record.
    async fn update(&self, id: UserId, candidate: User) -> RosterResult<User>;

    /// Removes the record with this id.
    async fn delete(&self, id: UserId) -> RosterResult<()>;

    /// Checks that the backing store is reachable.
    async fn health_check(&self) -> RosterResult<()>;
}
