//! In-process user repository.

use crate::{traits::UserRepository, UserRecord};
use async_trait::async_trait;
use parking_lot::RwLock;
use roster_core::{RosterResult, UserId};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::debug;

/// Map-backed repository with monotonic id assignment.
///
/// Ids start at 1 and are never reused, even after a delete.
#[derive(Debug)]
pub struct InMemoryUserRepository {
    users: RwLock<BTreeMap<UserId, UserRecord>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    /// Returns true when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<UserRecord>> {
        Ok(self.users.read().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> RosterResult<Option<UserRecord>> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn save(&self, user: &UserRecord) -> RosterResult<UserRecord> {
        let id = match user.id {
            Some(id) => {
                // Keep the sequence ahead of explicitly supplied ids
                self.next_id.fetch_max(id.0.saturating_add(1), Ordering::SeqCst);
                id
            }
            None => UserId(self.next_id.fetch_add(1, Ordering::SeqCst)),
        };

        let stored = UserRecord {
            id: Some(id),
            ..user.clone()
        };
        debug!("Storing user {} in memory", id);
        self.users.write().insert(id, stored.clone());
        Ok(stored)
    }

    async fn exists_by_id(&self, id: UserId) -> RosterResult<bool> {
        Ok(self.users.read().contains_key(&id))
    }

    async fn delete_by_id(&self, id: UserId) -> RosterResult<bool> {
        Ok(self.users.write().remove(&id).is_some())
    }

    async fn health_check(&self) -> RosterResult<()> {
        Ok(())
    }
}
