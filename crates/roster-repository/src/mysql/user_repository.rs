//! MySQL user repository implementation.

use crate::{traits::UserRepository, DatabasePoolInterface, UserRecord};
use async_trait::async_trait;
use roster_core::{RosterError, RosterResult, UserId};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// MySQL user repository implementation.
#[derive(Clone)]
pub struct MySqlUserRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlUserRepository {
    /// Creates a new MySQL user repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }

    async fn insert(&self, user: &UserRecord) -> RosterResult<UserId> {
        if let Some(id) = user.id {
            sqlx::query("INSERT INTO users (id, name, email) VALUES (?, ?, ?)")
                .bind(id.into_inner())
                .bind(&user.name)
                .bind(&user.email)
                .execute(self.pool.inner())
                .await?;
            return Ok(id);
        }

        let result = sqlx::query("INSERT INTO users (name, email) VALUES (?, ?)")
            .bind(&user.name)
            .bind(&user.email)
            .execute(self.pool.inner())
            .await?;

        i64::try_from(result.last_insert_id())
            .map(UserId)
            .map_err(|e| RosterError::Internal(format!("Generated id out of range: {}", e)))
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: Some(UserId(row.id)),
            name: row.name,
            email: row.email,
        }
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: UserId) -> RosterResult<Option<UserRecord>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(UserRecord::from))
    }

    async fn find_by_email(&self, email: &str) -> RosterResult<Option<UserRecord>> {
        debug!("Finding user by email: {}", email);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email
            FROM users
            WHERE email = ?
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(UserRecord::from))
    }

    async fn save(&self, user: &UserRecord) -> RosterResult<UserRecord> {
        let id = match user.id {
            Some(id) => {
                debug!("Updating user: {}", id);

                // MySQL reports zero affected rows for a no-op update, so
                // existence decides between update and insert
                if self.exists_by_id(id).await? {
                    sqlx::query("UPDATE users SET name = ?, email = ? WHERE id = ?")
                        .bind(&user.name)
                        .bind(&user.email)
                        .bind(id.into_inner())
                        .execute(self.pool.inner())
                        .await?;
                    id
                } else {
                    self.insert(user).await?
                }
            }
            None => {
                debug!("Saving new user: {}", user.email);
                self.insert(user).await?
            }
        };

        // MySQL doesn't support RETURNING, so read back the stored row
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RosterError::Internal(format!("Failed to fetch saved user {}", id)))
    }

    async fn exists_by_id(&self, id: UserId) -> RosterResult<bool> {
        let exists: i64 = sqlx::query_scalar(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)
            "#,
        )
        .bind(id.into_inner())
        .fetch_one(self.pool.inner())
        .await?;

        Ok(exists != 0)
    }

    async fn delete_by_id(&self, id: UserId) -> RosterResult<bool> {
        debug!("Deleting user: {}", id);

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> RosterResult<()> {
        self.pool.health_check().await
    }
}
