pub mod app;
pub mod auth;
pub mod database;
pub mod observability;
pub mod security;
pub mod server;

use thiserror::Error;

pub use app::{ApiConfig, AppConfig, AppMetadata};
pub use auth::{Argon2Config, AuthConfig, MAX_SESSION_LIFETIME};
pub use database::DatabaseConfig;
pub use observability::{LogFormat, ObservabilityConfig};
pub use security::{RateLimitConfig, SecurityConfig, SecurityHeadersConfig};
pub use server::ServerConfig;

/// Prefix of the environment variables overriding configuration files,
/// e.g. `BOOKSTORE__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "BOOKSTORE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Sanity checks run after deserialization.
pub trait Validate {
    fn validate(&self) -> Result<(), ConfigError>;
}

pub trait WithDefaults {
    fn with_defaults() -> Self;
}

/// Load the application configuration from files and environment variables
pub fn load() -> Result<AppConfig, ConfigError> {
    app::load_config()
}
