//! Token lifecycle module
//!
//! This module handles every state transition of a refresh token:
//! - signing and decoding tokens (`codec`)
//! - classifying presented tokens by value (`validator`)
//! - minting the first pair after login (`issuance`)
//! - exchanging a refresh token for a new pair (`rotation`)
//! - logout and account-wide session termination (`revocation`)

mod codec;
mod issuance;
mod revocation;
mod rotation;
mod validator;

#[cfg(test)]
mod tests;

pub use codec::{JwtTokenCodec, TokenCodec};
pub use issuance::{IssuanceService, IssuedSession};
pub use revocation::{LoggedOut, RevocationService, SessionsTerminated};
pub use rotation::RotationService;
pub use validator::{TokenStatus, TokenValidator};

use crate::domain::entities::token::TokenPair;
use crate::domain::value_objects::cookie::{
    build_set_directive, CookieDirective, ACCESS_COOKIE, AUTH_COOKIE_MAX_AGE_SECONDS,
    REFRESH_COOKIE,
};

/// `access` and `refresh` cookies carrying a freshly minted pair
fn session_cookies(tokens: &TokenPair) -> Vec<CookieDirective> {
    vec![
        build_set_directive(
            ACCESS_COOKIE,
            tokens.access_token.as_str(),
            AUTH_COOKIE_MAX_AGE_SECONDS,
            true,
        ),
        build_set_directive(
            REFRESH_COOKIE,
            tokens.refresh_token.as_str(),
            AUTH_COOKIE_MAX_AGE_SECONDS,
            true,
        ),
    ]
}
