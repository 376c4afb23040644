//! Token classification

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::entities::token::{Claims, TokenCategory};
use crate::errors::TokenError;

use super::codec::TokenCodec;

/// Outcome of inspecting a presented token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenStatus {
    /// Signature verified and not yet expired
    Valid(Claims),
    /// Signature verified but past its embedded expiry
    Expired(Claims),
    /// Bad signature, bad structure or unknown claims
    Malformed,
}

impl TokenStatus {
    /// Accepts only a valid token of the `expected` category
    pub fn require(self, expected: TokenCategory) -> Result<Claims, TokenError> {
        match self {
            TokenStatus::Valid(claims) if TokenValidator::require_category(&claims, expected) => {
                Ok(claims)
            }
            TokenStatus::Valid(_) => Err(TokenError::WrongCategory { expected }),
            TokenStatus::Expired(_) => Err(TokenError::Expired),
            TokenStatus::Malformed => Err(TokenError::Malformed),
        }
    }
}

/// Classifies tokens without letting decoding failures escape
#[derive(Clone)]
pub struct TokenValidator {
    codec: Arc<dyn TokenCodec>,
}

impl TokenValidator {
    pub fn new(codec: Arc<dyn TokenCodec>) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &dyn TokenCodec {
        self.codec.as_ref()
    }

    /// Classifies `token` against the current wall clock
    pub fn classify(&self, token: &str) -> TokenStatus {
        self.classify_at(token, Utc::now())
    }

    /// Classifies `token` as seen at instant `now`
    pub fn classify_at(&self, token: &str, now: DateTime<Utc>) -> TokenStatus {
        match self.codec.decode(token) {
            Ok(claims) if claims.is_expired_at(now) => TokenStatus::Expired(claims),
            Ok(claims) => TokenStatus::Valid(claims),
            Err(_) => TokenStatus::Malformed,
        }
    }

    pub fn require_category(claims: &Claims, expected: TokenCategory) -> bool {
        claims.category == expected
    }
}
