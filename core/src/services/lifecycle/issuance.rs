//! First token pair after a successful login

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::entities::refresh_record::RefreshTokenRecord;
use crate::domain::entities::token::TokenPair;
use crate::domain::value_objects::cookie::CookieDirective;
use crate::errors::DomainError;
use crate::repositories::{RefreshStore, UserRoleLookup};

use super::codec::TokenCodec;
use super::session_cookies;

/// A newly minted, registered token pair
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub username: String,
    /// Role snapshotted into both tokens
    pub role: String,
    pub tokens: TokenPair,
    /// Cookies to emit, in order
    pub cookies: Vec<CookieDirective>,
}

/// Mints and registers the first pair of a session
///
/// Called once the credential check (owned by user management) has succeeded.
pub struct IssuanceService<S: RefreshStore + ?Sized, U: UserRoleLookup + ?Sized> {
    codec: Arc<dyn TokenCodec>,
    store: Arc<S>,
    users: Arc<U>,
}

impl<S, U> IssuanceService<S, U>
where
    S: RefreshStore + ?Sized,
    U: UserRoleLookup + ?Sized,
{
    pub fn new(codec: Arc<dyn TokenCodec>, store: Arc<S>, users: Arc<U>) -> Self {
        Self { codec, store, users }
    }

    /// Issues an access + refresh pair for `username`
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedSession)` - Pair registered and cookies ready
    /// * `Err(DomainError::Forbidden)` - No such account
    /// * `Err(DomainError::Token(TokenError::Conflict))` - Registry invariant broken
    pub async fn issue_session(&self, username: &str) -> Result<IssuedSession, DomainError> {
        let role = match self.users.find_role(username).await? {
            Some(role) => role,
            None => {
                warn!(username, "Token issuance requested for unknown account");
                return Err(DomainError::Forbidden {
                    message: format!("unknown account: {}", username),
                });
            }
        };

        let tokens = self.codec.issue_pair(username, &role)?;
        self.store
            .insert(RefreshTokenRecord::new(username, &tokens.refresh_token, Utc::now()))
            .await?;

        info!(username, role = %role, "Issued new session tokens");

        let cookies = session_cookies(&tokens);
        Ok(IssuedSession {
            username: username.to_string(),
            role,
            tokens,
            cookies,
        })
    }
}
