//! MySQL implementation of the RefreshStore trait.
//!
//! Refresh tokens are stored by exact value in the `refresh_tokens` table. The
//! value itself has no length cap, so lookups and the unique index go through
//! its SHA-256 digest in `token_hash`. Rotation runs as a single transaction
//! whose `DELETE` doubles as the compare step.

use async_trait::async_trait;
use sqlx::{mysql::MySqlRow, MySqlPool, Row};
use tracing::{debug, error, info};

use dc_core::domain::entities::refresh_record::RefreshTokenRecord;
use dc_core::errors::{DomainError, TokenError};
use dc_core::repositories::RefreshStore;

use crate::InfrastructureError;

/// Schema of the refresh token registry
pub const REFRESH_TOKENS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS refresh_tokens (
        id BIGINT NOT NULL AUTO_INCREMENT,
        username VARCHAR(255) NOT NULL,
        token TEXT NOT NULL,
        token_hash BINARY(32) AS (UNHEX(SHA2(token, 256))) STORED NOT NULL,
        expiration VARCHAR(64) NOT NULL,
        PRIMARY KEY (id),
        UNIQUE KEY uk_refresh_tokens_token_hash (token_hash),
        KEY idx_refresh_tokens_username (username)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

/// Largest token value the `token` column accepts, in bytes
pub const TOKEN_COLUMN_CAPACITY: usize = 65_535;

/// MySQL implementation of RefreshStore
pub struct MySqlRefreshStore {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlRefreshStore {
    /// Create a new MySQL refresh token store
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Create the `refresh_tokens` table if it does not exist yet
    pub async fn migrate(&self) -> Result<(), InfrastructureError> {
        info!("Ensuring refresh_tokens table exists");
        sqlx::query(REFRESH_TOKENS_DDL).execute(&self.pool).await?;
        Ok(())
    }

    /// Convert database row to RefreshTokenRecord entity
    fn row_to_record(row: &MySqlRow) -> Result<RefreshTokenRecord, DomainError> {
        let id: i64 = row
            .try_get("id")
            .map_err(|e| internal("Failed to get id", e))?;

        Ok(RefreshTokenRecord {
            id: Some(id),
            username: row
                .try_get("username")
                .map_err(|e| internal("Failed to get username", e))?,
            token: row
                .try_get("token")
                .map_err(|e| internal("Failed to get token", e))?,
            expiration: row
                .try_get("expiration")
                .map_err(|e| internal("Failed to get expiration", e))?,
        })
    }
}

/// Wraps a database failure as an internal domain error
fn internal(context: &str, err: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("{}: {}", context, err),
    }
}

/// Maps an INSERT failure, turning a duplicate token into `Conflict`
pub(crate) fn map_insert_error(err: sqlx::Error) -> DomainError {
    match err {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            error!("Refresh token value already registered");
            TokenError::Conflict.into()
        }
        other => internal("Failed to save refresh token", other),
    }
}

// Token lookups go through the indexed digest
const EXISTS_QUERY: &str = r#"
    SELECT COUNT(*) AS present FROM refresh_tokens
    WHERE token_hash = UNHEX(SHA2(?, 256))
"#;

const FIND_QUERY: &str = r#"
    SELECT id, username, token, expiration
    FROM refresh_tokens
    WHERE token_hash = UNHEX(SHA2(?, 256))
    LIMIT 1
"#;

const DELETE_QUERY: &str = r#"
    DELETE FROM refresh_tokens
    WHERE token_hash = UNHEX(SHA2(?, 256))
"#;

const INSERT_QUERY: &str = r#"
    INSERT INTO refresh_tokens (username, token, expiration)
    VALUES (?, ?, ?)
"#;

#[async_trait]
impl RefreshStore for MySqlRefreshStore {
    async fn exists(&self, token: &str) -> Result<bool, DomainError> {
        let row = sqlx::query(EXISTS_QUERY)
            .bind(token)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| internal("Failed to check token existence", e))?;

        let present: i64 = row
            .try_get("present")
            .map_err(|e| internal("Failed to get existence result", e))?;

        Ok(present > 0)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshTokenRecord>, DomainError> {
        let result = sqlx::query(FIND_QUERY)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal("Failed to find refresh token", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn insert(&self, record: RefreshTokenRecord) -> Result<RefreshTokenRecord, DomainError> {
        let result = sqlx::query(INSERT_QUERY)
            .bind(&record.username)
            .bind(&record.token)
            .bind(&record.expiration)
            .execute(&self.pool)
            .await
            .map_err(map_insert_error)?;

        debug!(username = %record.username, "Refresh token registered");
        Ok(record.with_id(result.last_insert_id() as i64))
    }

    async fn delete_by_token(&self, token: &str) -> Result<bool, DomainError> {
        let result = sqlx::query(DELETE_QUERY)
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| internal("Failed to delete refresh token", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_by_username(&self, username: &str) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE username = ?")
            .bind(username)
            .execute(&self.pool)
            .await
            .map_err(|e| internal("Failed to delete user tokens", e))?;

        Ok(result.rows_affected() as usize)
    }

    async fn count_by_username(&self, username: &str) -> Result<usize, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM refresh_tokens WHERE username = ?")
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| internal("Failed to count user tokens", e))?;

        let total: i64 = row
            .try_get("total")
            .map_err(|e| internal("Failed to get token count", e))?;

        Ok(total as usize)
    }

    async fn rotate(
        &self,
        old_token: &str,
        replacement: RefreshTokenRecord,
    ) -> Result<RefreshTokenRecord, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| internal("Failed to begin rotation", e))?;

        // The row lock taken here serializes concurrent rotations of one value
        let deleted = sqlx::query(DELETE_QUERY)
            .bind(old_token)
            .execute(&mut *tx)
            .await
            .map_err(|e| internal("Failed to delete rotated token", e))?;

        if deleted.rows_affected() != 1 {
            tx.rollback()
                .await
                .map_err(|e| internal("Failed to roll back rotation", e))?;
            return Err(TokenError::NotRegistered.into());
        }

        // Dropping the transaction on error rolls the delete back
        let inserted = sqlx::query(INSERT_QUERY)
            .bind(&replacement.username)
            .bind(&replacement.token)
            .bind(&replacement.expiration)
            .execute(&mut *tx)
            .await
            .map_err(map_insert_error)?;

        tx.commit()
            .await
            .map_err(|e| internal("Failed to commit rotation", e))?;

        Ok(replacement.with_id(inserted.last_insert_id() as i64))
    }
}
