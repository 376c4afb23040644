//! Persisted refresh token registry entry.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::token::REFRESH_TOKEN_TTL_MS;

/// A live refresh token known to the registry
///
/// `expiration` is kept for audit and debugging only. Validation always trusts
/// the expiry embedded in the signed token itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenRecord {
    /// Surrogate key, `None` until the store assigns one
    pub id: Option<i64>,

    /// Owner of the token
    pub username: String,

    /// The exact encoded refresh token, unique across live records
    pub token: String,

    /// Display string of issuance time + refresh TTL
    pub expiration: String,
}

impl RefreshTokenRecord {
    /// Builds an unsaved record for a token issued at `issued_at`
    pub fn new(username: impl Into<String>, token: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            username: username.into(),
            token: token.into(),
            expiration: expiration_display(issued_at),
        }
    }

    /// Returns a copy carrying the store-assigned id
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

/// Formats `issued_at` + refresh TTL like `Sat Oct 26 14:03:11 UTC 2026`
pub fn expiration_display(issued_at: DateTime<Utc>) -> String {
    (issued_at + Duration::milliseconds(REFRESH_TOKEN_TTL_MS))
        .format("%a %b %d %H:%M:%S UTC %Y")
        .to_string()
}
