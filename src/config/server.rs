use serde::{Deserialize, Serialize};

use super::{ConfigError, Validate, WithDefaults};

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Number of worker threads, 0 means one per CPU
    #[serde(default)]
    pub workers: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl ServerConfig {
    pub fn address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }

    pub fn worker_count(&self) -> usize {
        match self.workers {
            0 => num_cpus::get(),
            workers => workers,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::ValidationError(
                "server.host cannot be empty".to_string(),
            ));
        }
        if self.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl WithDefaults for ServerConfig {
    fn with_defaults() -> Self {
        Self::default()
    }
}
