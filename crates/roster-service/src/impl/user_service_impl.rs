//! User service implementation.

use crate::cache::{cache_keys, CacheExt, CacheInterface};
use crate::dto::User;
use crate::user_service::UserService;
use crate::user_validation::validate_user;
use async_trait::async_trait;
use roster_config::CacheConfig;
use roster_core::{RosterError, RosterResult, UserId};
use roster_repository::{UserRecord, UserRepository};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// How writes interact with cached entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CachePolicy {
    /// Lifetime of entries written by the service. `None` never expires.
    pub ttl: Option<Duration>,
    /// Refresh the entry after an update and evict it after a delete.
    /// Off by default, which leaves stale entries until they expire.
    pub refresh_on_write: bool,
}

impl From<&CacheConfig> for CachePolicy {
    fn from(config: &CacheConfig) -> Self {
        Self {
            ttl: config.ttl(),
            refresh_on_write: config.refresh_on_write,
        }
    }
}

/// User service backed by a repository with a cache-aside layer.
///
/// Cache failures are logged and otherwise ignored; they never change the
/// outcome of an operation.
pub struct UserServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    cache: Arc<dyn CacheInterface>,
    policy: CachePolicy,
}

impl UserServiceImpl {
    /// Creates a new user service with the default cache policy.
    pub fn new(user_repository: Arc<dyn UserRepository>, cache: Arc<dyn CacheInterface>) -> Self {
        Self {
            user_repository,
            cache,
            policy: CachePolicy::default(),
        }
    }

    /// Sets the cache policy.
    #[must_use]
    pub fn with_policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    async fn cache_user(&self, user: &User) {
        let Some(id) = user.id else { return };
        let key = cache_keys::user_by_id(id);
        if let Err(e) = self.cache.set(&key, user, self.policy.ttl).await {
            warn!("Failed to cache user {}: {}", id, e);
        }
    }

    async fn evict_user(&self, id: UserId) {
        let key = cache_keys::user_by_id(id);
        if let Err(e) = self.cache.delete(&key).await {
            warn!("Failed to evict user {} from cache: {}", id, e);
        }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn create(&self, candidate: User) -> RosterResult<User> {
        debug!("Creating user: {}", candidate.email);

        validate_user(&candidate)?;

        if self
            .user_repository
            .find_by_email(&candidate.email)
            .await?
            .is_some()
        {
            debug!("Email already registered: {}", candidate.email);
            return Err(RosterError::duplicate_email());
        }

        let saved = self
            .user_repository
            .save(&UserRecord::from(&candidate))
            .await?;
        let user = User::from(saved);

        self.cache_user(&user).await;

        if let Some(id) = user.id {
            info!("User created: {}", id);
        }
        Ok(user)
    }

    async fn get_by_id(&self, id: UserId) -> RosterResult<Option<User>> {
        debug!("Getting user: {}", id);

        let key = cache_keys::user_by_id(id);
        match self.cache.get::<User>(&key).await {
            Ok(Some(user)) => return Ok(Some(user)),
            Ok(None) => {}
            Err(e) => warn!("Cache read failed for user {}, falling back to store: {}", id, e),
        }

        let Some(record) = self.user_repository.find_by_id(id).await? else {
            debug!("User not found: {}", id);
            return Ok(None);
        };

        let user = User::from(record);
        self.cache_user(&user).await;
        Ok(Some(user))
    }

    async fn update(&self, id: UserId, candidate: User) -> RosterResult<User> {
        debug!("Updating user: {}", id);

        validate_user(&candidate)?;

        let mut record = self
            .user_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| RosterError::not_found("user", id))?;

        record.replace_details(candidate.name, candidate.email);

        let saved = self.user_repository.save(&record).await?;
        let user = User::from(saved);

        if self.policy.refresh_on_write {
            self.cache_user(&user).await;
        }

        info!("User updated: {}", id);
        Ok(user)
    }

    async fn delete(&self, id: UserId) -> RosterResult<()> {
        debug!("Deleting user: {}", id);

        if !self.user_repository.exists_by_id(id).await? {
            return Err(RosterError::not_found("user", id));
        }

        self.user_repository.delete_by_id(id).await?;

        if self.policy.refresh_on_write {
            self.evict_user(id).await;
        }

        info!("User deleted: {}", id);
        Ok(())
    }

    async fn health_check(&self) -> RosterResult<()> {
        self.user_repository.health_check().await
    }
}
