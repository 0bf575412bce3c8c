//! Dependency wiring.
//!
//! Builds the user store, the cache, and the user service from
//! configuration and hands out trait objects to the REST layer.

use roster_config::{AppConfig, DatabaseConfig, RedisConfig};
use roster_core::RosterResult;
use roster_repository::{
    create_pool, DatabasePoolInterface, InMemoryUserRepository, MySqlUserRepository,
    UserRepository,
};
use roster_service::{
    create_redis_pool, CacheInterface, CachePolicy, RedisCacheService, UserService,
    UserServiceImpl,
};
use std::sync::Arc;
use tracing::info;

/// Resolved application components.
pub struct AppContainer {
    database_pool: Option<Arc<dyn DatabasePoolInterface>>,
    user_repository: Arc<dyn UserRepository>,
    cache: Arc<dyn CacheInterface>,
    user_service: Arc<dyn UserService>,
}

impl AppContainer {
    /// Builds every component described by `config`.
    pub async fn build(config: &AppConfig) -> RosterResult<Self> {
        let (database_pool, user_repository) = build_repository(&config.database).await?;
        let cache = build_cache(&config.redis)?;
        Ok(Self::from_parts(database_pool, user_repository, cache, CachePolicy::from(&config.cache)))
    }

    /// Assembles the service over pre-built store and cache.
    #[must_use]
    pub fn from_parts(
        database_pool: Option<Arc<dyn DatabasePoolInterface>>,
        user_repository: Arc<dyn UserRepository>,
        cache: Arc<dyn CacheInterface>,
        policy: CachePolicy,
    ) -> Self {
        let user_service: Arc<dyn UserService> = Arc::new(
            UserServiceImpl::new(user_repository.clone(), cache.clone()).with_policy(policy),
        );

        Self {
            database_pool,
            user_repository,
            cache,
            user_service,
        }
    }

    pub fn user_service(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn cache(&self) -> Arc<dyn CacheInterface> {
        self.cache.clone()
    }

    /// Releases pooled database connections, if any.
    pub async fn shutdown(&self) {
        if let Some(pool) = &self.database_pool {
            pool.close().await;
        }
    }
}

/// Picks the user store from the database URL.
async fn build_repository(
    config: &DatabaseConfig,
) -> RosterResult<(Option<Arc<dyn DatabasePoolInterface>>, Arc<dyn UserRepository>)> {
    if config.is_in_memory() {
        info!("Using in-memory user store");
        return Ok((None, Arc::new(InMemoryUserRepository::new())));
    }

    let pool: Arc<dyn DatabasePoolInterface> = create_pool(config).await?;
    let repository = Arc::new(MySqlUserRepository::new(pool.clone()));
    Ok((Some(pool), repository))
}

/// Redis when enabled, otherwise a cache that always misses.
fn build_cache(config: &RedisConfig) -> RosterResult<Arc<dyn CacheInterface>> {
    if !config.enabled {
        info!("Redis cache disabled");
        return Ok(Arc::new(RedisCacheService::disabled()));
    }

    let pool = create_redis_pool(config)?;
    Ok(Arc::new(RedisCacheService::new(pool)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_config::IN_MEMORY_DATABASE_URL;
    use roster_core::UserId;
    use roster_service::{InMemoryCache, User};

    fn local_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.database.url = IN_MEMORY_DATABASE_URL.to_string();
        config.redis.enabled = false;
        config
    }

    #[tokio::test]
    async fn test_build_in_memory_without_cache() {
        let container = AppContainer::build(&local_config()).await.unwrap();

        assert!(container.database_pool.is_none());
        assert!(!container.cache().is_enabled());
        assert!(container.user_repository().health_check().await.is_ok());
    }

    #[tokio::test]
    async fn test_service_round_trip_through_container() {
        let container = AppContainer::build(&local_config()).await.unwrap();
        let service = container.user_service();

        let created = service
            .create(User::new("Ada", "ada@example.com"))
            .await
            .unwrap();

        assert_eq!(created.id, Some(UserId(1)));
        assert_eq!(service.get_by_id(UserId(1)).await.unwrap(), Some(created));
        container.shutdown().await;
    }

    #[tokio::test]
    async fn test_redis_pool_is_lazy() {
        let mut config = local_config();
        config.redis.enabled = true;
        config.redis.url = "redis://127.0.0.1:1".to_string();

        let container = AppContainer::build(&config).await.unwrap();

        assert!(container.cache().is_enabled());
    }

    #[tokio::test]
    async fn test_from_parts_shares_cache() {
        let cache = Arc::new(InMemoryCache::new());
        let container = AppContainer::from_parts(
            None,
            Arc::new(InMemoryUserRepository::new()),
            cache.clone(),
            CachePolicy::default(),
        );

        container
            .user_service()
            .create(User::new("Ada", "ada@example.com"))
            .await
            .unwrap();

        assert!(cache.exists("1").await.unwrap());
    }
}
