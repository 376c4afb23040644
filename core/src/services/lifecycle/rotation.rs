//! Refresh token rotation

use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::entities::refresh_record::RefreshTokenRecord;
use crate::domain::entities::token::TokenCategory;
use crate::domain::value_objects::cookie::{build_clear_directive, ACCESS_COOKIE, REFRESH_COOKIE};
use crate::errors::{DomainError, TokenError};
use crate::repositories::RefreshStore;

use super::codec::TokenCodec;
use super::issuance::IssuedSession;
use super::session_cookies;
use super::validator::TokenValidator;

/// Exchanges a live refresh token for a new access + refresh pair
///
/// A refresh token value moves `Issued → Active → {Rotated | Expired | Revoked}`
/// and every terminal state is final for that value. Each successful rotation
/// starts a new value with its own lifecycle.
pub struct RotationService<S: RefreshStore + ?Sized> {
    validator: TokenValidator,
    store: Arc<S>,
}

impl<S: RefreshStore + ?Sized> RotationService<S> {
    pub fn new(codec: Arc<dyn TokenCodec>, store: Arc<S>) -> Self {
        Self {
            validator: TokenValidator::new(codec),
            store,
        }
    }

    /// Rotates the presented refresh token
    ///
    /// # Arguments
    ///
    /// * `refresh_token` - Value of the `refresh` cookie, if the request carried one
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedSession)` - New pair plus the cookie directives to emit
    /// * `Err(DomainError::Token(..))` - `Unauthenticated`, `Expired`, `Malformed`,
    ///   `WrongCategory` or `NotRegistered`; `Conflict` and `Signing` signal server faults
    /// * `Err(DomainError::Internal)` - The store failed
    pub async fn reissue(&self, refresh_token: Option<&str>) -> Result<IssuedSession, DomainError> {
        let old_token = refresh_token.ok_or(TokenError::Unauthenticated)?;

        let claims = self
            .validator
            .classify(old_token)
            .require(TokenCategory::Refresh)
            .map_err(|err| {
                warn!("Refresh token rejected: {}", err);
                err
            })?;

        // Expiry and category are settled before the registry is consulted
        if !self.store.exists(old_token).await? {
            warn!(username = %claims.username, "The refresh token is not stored in the registry");
            return Err(TokenError::NotRegistered.into());
        }

        let tokens = self.validator.codec().issue_pair(&claims.username, &claims.role)?;
        let replacement = RefreshTokenRecord::new(&claims.username, &tokens.refresh_token, Utc::now());

        match self.store.rotate(old_token, replacement).await {
            Ok(_) => {}
            Err(DomainError::Token(TokenError::NotRegistered)) => {
                warn!(username = %claims.username, "Refresh token was rotated by a concurrent request");
                return Err(TokenError::NotRegistered.into());
            }
            Err(DomainError::Token(TokenError::Conflict)) => {
                error!(username = %claims.username, "Freshly minted refresh token collided with a live one");
                return Err(TokenError::Conflict.into());
            }
            Err(err) => return Err(err),
        }

        info!(username = %claims.username, "Refresh token rotated");

        let mut cookies = vec![
            build_clear_directive(ACCESS_COOKIE),
            build_clear_directive(REFRESH_COOKIE),
        ];
        cookies.extend(session_cookies(&tokens));

        Ok(IssuedSession {
            username: claims.username,
            role: claims.role,
            tokens,
            cookies,
        })
    }
}
