//! # Infrastructure Layer
//!
//! Concrete implementations of the ports declared in `dc_core`:
//!
//! - **Database**: MySQL connection pool and the `refresh_tokens` registry using SQLx
//! - **Accounts**: role lookup against the `users_auth` table
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

// Re-export core types for convenience
pub use dc_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Configuration re-exports for infrastructure consumers
pub mod config {
    pub use dc_shared::config::DatabaseConfig;
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
