//! Domain-specific error types and error handling.

use thiserror::Error;

use crate::domain::entities::token::TokenCategory;

/// Token lifecycle failures
///
/// Everything except [`TokenError::Conflict`] and [`TokenError::Signing`] is an
/// expected, per-request outcome. Those two indicate a broken invariant or a
/// misconfigured deployment and must surface as server faults.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("No refresh token presented")]
    Unauthenticated,

    #[error("Token expired")]
    Expired,

    #[error("Invalid token format")]
    Malformed,

    #[error("Token category mismatch: expected {expected}")]
    WrongCategory { expected: TokenCategory },

    #[error("Refresh token is not registered")]
    NotRegistered,

    #[error("Refresh token already registered")]
    Conflict,

    #[error("Token signing failed: {message}")]
    Signing { message: String },
}

impl TokenError {
    /// Broken invariant or misconfiguration rather than a bad client token
    pub fn is_server_fault(&self) -> bool {
        matches!(self, TokenError::Conflict | TokenError::Signing { .. })
    }
}

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// The token failure carried by this error, if any
    pub fn token_error(&self) -> Option<&TokenError> {
        match self {
            DomainError::Token(err) => Some(err),
            _ => None,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
