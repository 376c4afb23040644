//! Logout and account-wide session termination

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::entities::token::TokenCategory;
use crate::domain::value_objects::cookie::{
    build_clear_directive, CookieDirective, ACCESS_COOKIE, REFRESH_COOKIE, SESSION_COOKIE,
    USER_ID_COOKIE,
};
use crate::errors::{DomainError, TokenError};
use crate::repositories::RefreshStore;

use super::codec::TokenCodec;
use super::validator::TokenValidator;

/// Successful logout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedOut {
    /// Owner of the revoked token, `None` when no session was presented
    pub username: Option<String>,
    pub cookies: Vec<CookieDirective>,
}

/// Result of dropping every session of an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionsTerminated {
    pub removed: usize,
    pub cookies: Vec<CookieDirective>,
}

/// Revokes refresh tokens before their natural expiry
pub struct RevocationService<S: RefreshStore + ?Sized> {
    validator: TokenValidator,
    store: Arc<S>,
}

impl<S: RefreshStore + ?Sized> RevocationService<S> {
    pub fn new(codec: Arc<dyn TokenCodec>, store: Arc<S>) -> Self {
        Self {
            validator: TokenValidator::new(codec),
            store,
        }
    }

    /// Logs out the session identified by `refresh_token`
    ///
    /// A request without a refresh token is treated as already logged out and
    /// still receives the clearing cookies. A request presenting a bad token is
    /// rejected and gets no cookies at all.
    pub async fn logout(&self, refresh_token: Option<&str>) -> Result<LoggedOut, DomainError> {
        let Some(token) = refresh_token else {
            warn!("No refresh token found, proceeding with logout");
            return Ok(LoggedOut {
                username: None,
                cookies: logout_cookies(),
            });
        };

        let claims = self
            .validator
            .classify(token)
            .require(TokenCategory::Refresh)
            .map_err(|err| {
                warn!("Logout rejected: {}", err);
                err
            })?;

        if !self.store.exists(token).await? {
            warn!(username = %claims.username, "Logout with a refresh token missing from the registry");
            return Err(TokenError::NotRegistered.into());
        }

        // A concurrent rotation or logout removed the token after the check.
        // The successor of a rotation stays live, so this logout revoked nothing.
        if !self.store.delete_by_token(token).await? {
            warn!(username = %claims.username, "Refresh token vanished before it could be revoked");
            return Err(TokenError::NotRegistered.into());
        }

        info!(username = %claims.username, "Logged out");

        Ok(LoggedOut {
            username: Some(claims.username),
            cookies: logout_cookies(),
        })
    }

    /// Drops every refresh token of `username`, e.g. on account deletion
    pub async fn revoke_all_sessions(&self, username: &str) -> Result<SessionsTerminated, DomainError> {
        let removed = self.store.delete_all_by_username(username).await?;
        info!(username, removed, "Terminated all sessions");

        let mut cookies = logout_cookies();
        cookies.insert(2, build_clear_directive(USER_ID_COOKIE));

        Ok(SessionsTerminated { removed, cookies })
    }
}

/// `refresh`, `access` and `JSESSIONID` removal
fn logout_cookies() -> Vec<CookieDirective> {
    vec![
        build_clear_directive(REFRESH_COOKIE),
        build_clear_directive(ACCESS_COOKIE),
        build_clear_directive(SESSION_COOKIE),
    ]
}
