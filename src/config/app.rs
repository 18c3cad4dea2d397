use serde::{Deserialize, Serialize};

use super::{
    AuthConfig, ConfigError, DatabaseConfig, ENV_PREFIX, ObservabilityConfig, SecurityConfig,
    ServerConfig, Validate, WithDefaults,
};

/// Top-level application configuration that aggregates all config modules
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application metadata
    pub app: AppMetadata,
    /// HTTP listener
    pub server: ServerConfig,
    /// Database connection and migrations
    pub database: DatabaseConfig,
    /// Sessions and password hashing
    pub auth: AuthConfig,
    /// Login throttling and response headers
    pub security: SecurityConfig,
    /// Logging
    pub observability: ObservabilityConfig,
    /// JSON API documentation
    pub api: ApiConfig,
}

/// Application metadata configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppMetadata {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_app_version")]
    pub version: String,
    /// Application environment (development, staging, production)
    #[serde(default = "default_environment")]
    pub environment: String,
    /// Graceful shutdown timeout in seconds
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout: u64,
}

/// API documentation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_swagger_enabled")]
    pub swagger_enabled: bool,
}

fn default_app_name() -> String {
    "bookstore".to_string()
}

fn default_app_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_shutdown_timeout() -> u64 {
    30
}

fn default_swagger_enabled() -> bool {
    true
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
            environment: default_environment(),
            shutdown_timeout: default_shutdown_timeout(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            swagger_enabled: default_swagger_enabled(),
        }
    }
}

impl Validate for AppMetadata {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::ValidationError(
                "app.name cannot be empty".to_string(),
            ));
        }
        if self.environment.is_empty() {
            return Err(ConfigError::ValidationError(
                "app.environment cannot be empty".to_string(),
            ));
        }
        if self.shutdown_timeout == 0 {
            return Err(ConfigError::ValidationError(
                "app.shutdown_timeout must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.app.validate()?;
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.security.validate()?;
        self.observability.validate()?;
        Ok(())
    }
}

impl WithDefaults for AppConfig {
    fn with_defaults() -> Self {
        Self {
            app: AppMetadata::default(),
            server: ServerConfig::with_defaults(),
            database: DatabaseConfig::with_defaults(),
            auth: AuthConfig::with_defaults(),
            security: SecurityConfig::with_defaults(),
            observability: ObservabilityConfig::with_defaults(),
            api: ApiConfig::default(),
        }
    }
}

/// Load configuration from files and environment variables
///
/// Configuration loading follows this precedence (highest to lowest):
/// 1. Environment variables: BOOKSTORE__SERVER__PORT=8080
/// 2. config/local.toml (git-ignored, developer overrides)
/// 3. config/{APP_ENV}.toml (development/staging/production)
/// 4. config/default.toml (base defaults)
pub fn load_config() -> Result<AppConfig, ConfigError> {
    use config::{Config, Environment, File};

    let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

    let config = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{}", env)).required(false))
        .add_source(File::with_name("config/local").required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    app_config.validate()?;

    Ok(app_config)
}
