//! Shared configuration and common types for the DogCat server
//!
//! This crate provides functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Error response structures returned by the API

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, DatabaseConfig, Environment, JwtConfig, LoggingConfig, ServerConfig,
    StoreBackend,
};
pub use errors::{error_codes, ErrorResponse};
