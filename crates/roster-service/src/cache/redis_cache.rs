//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Config, Pool, PoolConfig, Runtime};
use roster_config::RedisConfig;
use roster_core::{RosterError, RosterResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Redis-based cache service.
pub struct RedisCacheService {
    /// Redis connection pool. `None` when caching is disabled.
    pool: Option<Arc<Pool>>,
}

impl RedisCacheService {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool: Some(pool) }
    }

    /// Create a no-op cache service (for when Redis is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    async fn get_conn(&self) -> RosterResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool.get().await.map_err(|e| {
                RosterError::Cache(format!("Failed to get Redis connection: {}", e))
            }),
            None => Err(RosterError::Cache("Cache is disabled".to_string())),
        }
    }
}

/// Builds a Redis pool from configuration.
///
/// Connections are opened lazily, so an unreachable server only shows up
/// as cache errors on first use.
pub fn create_redis_pool(config: &RedisConfig) -> RosterResult<Arc<Pool>> {
    let mut cfg = Config::from_url(config.url.clone());
    cfg.pool = Some(PoolConfig::new(config.pool_size as usize));

    let pool = cfg
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| RosterError::Configuration(format!("Invalid Redis configuration: {}", e)))?;

    info!("Redis pool created for {}", config.url);
    Ok(Arc::new(pool))
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> RosterResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn.get(key).await.map_err(|e| {
            RosterError::Cache(format!("Failed to get key '{}': {}", key, e))
        })?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Option<Duration>) -> RosterResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;

        let result = match ttl {
            Some(ttl) => {
                let ttl_secs = ttl.as_secs().max(1);
                conn.set_ex::<_, _, ()>(key, value, ttl_secs).await
            }
            None => conn.set::<_, _, ()>(key, value).await,
        };
        result.map_err(|e| RosterError::Cache(format!("Failed to set key '{}': {}", key, e)))?;

        debug!("Cached key '{}' with TTL {:?}", key, ttl);
        Ok(())
    }

    async fn delete(&self, key: &str) -> RosterResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn.del(key).await.map_err(|e| {
            RosterError::Cache(format!("Failed to delete key '{}': {}", key, e))
        })?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }

    async fn exists(&self, key: &str) -> RosterResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let mut conn = self.get_conn().await?;
        let exists: bool = conn.exists(key).await.map_err(|e| {
            RosterError::Cache(format!("Failed to check key '{}': {}", key, e))
        })?;

        Ok(exists)
    }
}
