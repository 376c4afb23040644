//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TokenError;

/// Access token lifetime (1 day)
pub const ACCESS_TOKEN_TTL_MS: i64 = 86_400_000;

/// Refresh token lifetime (7 days)
pub const REFRESH_TOKEN_TTL_MS: i64 = 604_800_000;

/// Usage context a token was minted for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenCategory {
    Access,
    Refresh,
}

impl TokenCategory {
    /// Lifetime granted to newly minted tokens of this category
    pub fn ttl(&self) -> Duration {
        match self {
            TokenCategory::Access => Duration::milliseconds(ACCESS_TOKEN_TTL_MS),
            TokenCategory::Refresh => Duration::milliseconds(REFRESH_TOKEN_TTL_MS),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenCategory::Access => "access",
            TokenCategory::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims structure for JWT payload
///
/// The role is a snapshot taken at issuance. It is never re-derived from the
/// account while the token is alive, so a role change becomes visible only
/// after the next reissue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Access or refresh
    pub category: TokenCategory,

    /// Subject (account username)
    pub username: String,

    /// Authority string, e.g. `ROLE_USER`
    pub role: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// JWT ID, keeps every minted token value distinct
    pub jti: String,
}

impl Claims {
    /// Creates claims expiring `ttl` after `now`
    ///
    /// Fails with `TokenError::Signing` when `now + ttl` is not a representable
    /// instant.
    pub fn new(
        category: TokenCategory,
        username: impl Into<String>,
        role: impl Into<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        let expires = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Signing {
                message: format!("token lifetime out of range: {}", ttl),
            })?;

        Ok(Self {
            category,
            username: username.into(),
            role: role.into(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    /// A token expiring at `T` is invalid at every instant `>= T`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Expiry as a timestamp, `None` if the claim is out of range
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

/// Freshly minted access + refresh token pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
        }
    }
}
