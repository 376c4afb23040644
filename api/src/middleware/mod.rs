//! Request filters applied around the router
//!
//! - `access`: resolves the `access` cookie into an [`AuthContext`]
//! - `revocation`: answers `POST /logout` before routing

pub mod access;
pub mod revocation;

pub use access::{AccessGuard, AuthContext};
pub use revocation::RevocationFilter;
