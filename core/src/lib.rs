//! # DogCat Core
//!
//! Token lifecycle domain for the DogCat community backend.
//! This crate contains the token entities, the signed-token codec and validator,
//! the refresh token registry interface and the rotation / revocation / issuance
//! services built on top of them.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
