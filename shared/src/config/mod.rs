//! Configuration module with business-specific sub-modules
//!
//! - `auth` - token signing configuration
//! - `database` - MySQL connection and pool configuration
//! - `environment` - environment detection and logging configuration
//! - `server` - HTTP server bind configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

pub use auth::{JwtConfig, StoreBackend};
pub use database::DatabaseConfig;
pub use environment::{Environment, LoggingConfig};
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Token signing configuration
    pub jwt: JwtConfig,

    /// Where refresh token records are kept
    #[serde(default)]
    pub store: StoreBackend,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            jwt: JwtConfig::default(),
            store: StoreBackend::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
            store: StoreBackend::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Rejects settings that must never reach production
    pub fn validate(&self) -> Result<(), String> {
        if self.jwt.secret.trim().is_empty() {
            return Err("JWT_SECRET must not be empty".to_string());
        }
        if self.environment.is_production() && self.jwt.is_using_default_secret() {
            return Err("JWT_SECRET must be set in production".to_string());
        }
        if self.environment.is_production() && self.store == StoreBackend::Memory {
            return Err("the in-memory refresh store cannot be used in production".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid_outside_production() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_rejects_default_secret() {
        let config = AppConfig {
            environment: Environment::Production,
            ..AppConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("JWT_SECRET"));
    }

    #[test]
    fn test_production_rejects_memory_store() {
        let config = AppConfig {
            environment: Environment::Production,
            jwt: JwtConfig::new("a-real-production-secret"),
            store: StoreBackend::Memory,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        let config = AppConfig {
            jwt: JwtConfig::new("   "),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
