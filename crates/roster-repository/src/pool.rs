//! MySQL connection pool.

use async_trait::async_trait;
use roster_config::DatabaseConfig;
use roster_core::{Interface, RosterError, RosterResult};
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::sync::Arc;
use tracing::{info, warn};

/// Pool handle shared by the MySQL repositories.
#[async_trait]
pub trait DatabasePoolInterface: Interface + Send + Sync {
    fn inner(&self) -> &MySqlPool;

    /// Round-trips a trivial query.
    async fn health_check(&self) -> RosterResult<()>;

    /// Waits for checked-out connections to return, then closes them.
    async fn close(&self);
}

/// Owns the sqlx pool.
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Opens a pool sized and timed from `config`.
    ///
    /// Fails if the first connections cannot be established.
    pub async fn new(config: &DatabaseConfig) -> RosterResult<Self> {
        let pool = pool_options(config).connect(&config.url).await.map_err(|e| {
            warn!("MySQL unreachable: {}", e);
            RosterError::Database(format!("Failed to connect: {}", e))
        })?;

        info!(
            "MySQL pool ready ({}..={} connections)",
            config.min_connections, config.max_connections
        );
        Ok(Self { pool })
    }
}

fn pool_options(config: &DatabaseConfig) -> MySqlPoolOptions {
    MySqlPoolOptions::new()
        .min_connections(config.min_connections)
        .max_connections(config.max_connections)
        .acquire_timeout(config.connect_timeout())
        .idle_timeout(Some(config.idle_timeout()))
}

#[async_trait]
impl DatabasePoolInterface for DatabasePool {
    fn inner(&self) -> &MySqlPool {
        &self.pool
    }

    async fn health_check(&self) -> RosterResult<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RosterError::Database(format!("Health check failed: {}", e)))?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("MySQL pool closed");
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("idle", &self.pool.num_idle())
            .field("closed", &self.pool.is_closed())
            .finish()
    }
}

/// Opens a pool and shares it.
pub async fn create_pool(config: &DatabaseConfig) -> RosterResult<Arc<DatabasePool>> {
    DatabasePool::new(config).await.map(Arc::new)
}
