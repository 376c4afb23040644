//! Role lookup backed by the `users_auth` table.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use dc_core::errors::DomainError;
use dc_core::repositories::{UserRoleLookup, DEFAULT_ROLE};

/// Reads `users_auth.authorities` for an account
///
/// Accounts are keyed by `user_id`, which is the username carried in tokens.
/// A row with a `NULL` authority belongs to a regular member.
pub struct MySqlUserRoleLookup {
    pool: MySqlPool,
}

impl MySqlUserRoleLookup {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRoleLookup for MySqlUserRoleLookup {
    async fn find_role(&self, username: &str) -> Result<Option<String>, DomainError> {
        let row = sqlx::query("SELECT authorities FROM users_auth WHERE user_id = ? LIMIT 1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to look up account role: {}", e),
            })?;

        let Some(row) = row else {
            return Ok(None);
        };

        let authority: Option<String> = row.try_get("authorities").map_err(|e| DomainError::Internal {
            message: format!("Failed to get authorities: {}", e),
        })?;

        Ok(Some(normalize_authority(authority)))
    }
}

/// Falls back to the member role for blank or missing authorities
pub(crate) fn normalize_authority(authority: Option<String>) -> String {
    match authority {
        Some(role) if !role.trim().is_empty() => role.trim().to_string(),
        _ => DEFAULT_ROLE.to_string(),
    }
}
