//! Authentication route handlers
//!
//! - Token reissue (refresh token rotation)
//! - Account-wide session termination
//!
//! Logout is answered by [`crate::middleware::RevocationFilter`] before routing.

pub mod reissue;
pub mod sessions;
