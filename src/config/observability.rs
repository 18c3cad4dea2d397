use serde::{Deserialize, Serialize};

use super::{ConfigError, Validate, WithDefaults};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "info,sqlx=warn".to_string()
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

impl Validate for ObservabilityConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.log_level.is_empty() {
            return Err(ConfigError::ValidationError(
                "observability.log_level cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl WithDefaults for ObservabilityConfig {
    fn with_defaults() -> Self {
        Self::default()
    }
}
