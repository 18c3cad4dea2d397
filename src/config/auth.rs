use serde::{Deserialize, Serialize};

use super::{ConfigError, Validate, WithDefaults};

/// Session and password hashing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Session lifetime in seconds
    #[serde(default = "default_session_lifetime")]
    pub session_lifetime: u64,
    /// How long a resolved session stays in the local cache, in seconds
    #[serde(default = "default_session_cache_ttl")]
    pub session_cache_ttl: u64,
    /// Interval between purges of expired session rows, in seconds
    #[serde(default = "default_session_cleanup_interval")]
    pub session_cleanup_interval: u64,
    /// Name of the cookie carrying the session key
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,
    /// Only send the session cookie over HTTPS
    #[serde(default)]
    pub secure_cookie: bool,
    /// Argon2 configuration
    #[serde(default = "Argon2Config::default")]
    pub argon2: Argon2Config,
}

/// Argon2 password hashing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argon2Config {
    /// Memory cost in KB (64MB = 65536 KB)
    #[serde(default = "default_argon2_memory_cost")]
    pub memory_cost: u32,
    /// Time cost (iterations)
    #[serde(default = "default_argon2_time_cost")]
    pub time_cost: u32,
    /// Parallelism (number of lanes)
    #[serde(default = "default_argon2_parallelism")]
    pub parallelism: u32,
    /// Hash length in bytes
    #[serde(default = "default_argon2_hash_length")]
    pub hash_length: u32,
}

/// Longest accepted session lifetime, in seconds (ten years)
pub const MAX_SESSION_LIFETIME: u64 = 315_360_000;

fn default_session_lifetime() -> u64 {
    1_209_600 // 2 weeks
}

fn default_session_cache_ttl() -> u64 {
    300 // 5 minutes
}

fn default_session_cleanup_interval() -> u64 {
    3600 // 1 hour
}

fn default_session_cookie() -> String {
    "sessionid".to_string()
}

fn default_argon2_memory_cost() -> u32 {
    65536 // 64 MB
}

fn default_argon2_time_cost() -> u32 {
    3
}

fn default_argon2_parallelism() -> u32 {
    4
}

fn default_argon2_hash_length() -> u32 {
    32
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_lifetime: default_session_lifetime(),
            session_cache_ttl: default_session_cache_ttl(),
            session_cleanup_interval: default_session_cleanup_interval(),
            session_cookie: default_session_cookie(),
            secure_cookie: false,
            argon2: Argon2Config::default(),
        }
    }
}

impl Default for Argon2Config {
    fn default() -> Self {
        Self {
            memory_cost: default_argon2_memory_cost(),
            time_cost: default_argon2_time_cost(),
            parallelism: default_argon2_parallelism(),
            hash_length: default_argon2_hash_length(),
        }
    }
}

impl Validate for AuthConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.session_lifetime == 0 {
            return Err(ConfigError::ValidationError(
                "auth.session_lifetime must be > 0".to_string(),
            ));
        }
        if self.session_lifetime > MAX_SESSION_LIFETIME {
            return Err(ConfigError::ValidationError(format!(
                "auth.session_lifetime must be <= {MAX_SESSION_LIFETIME}"
            )));
        }
        if self.session_cache_ttl == 0 {
            return Err(ConfigError::ValidationError(
                "auth.session_cache_ttl must be > 0".to_string(),
            ));
        }
        if self.session_cleanup_interval == 0 {
            return Err(ConfigError::ValidationError(
                "auth.session_cleanup_interval must be > 0".to_string(),
            ));
        }
        if self.session_cookie.is_empty() {
            return Err(ConfigError::ValidationError(
                "auth.session_cookie cannot be empty".to_string(),
            ));
        }
        self.argon2.validate()?;
        Ok(())
    }
}

impl Validate for Argon2Config {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.time_cost == 0 {
            return Err(ConfigError::ValidationError(
                "auth.argon2.time_cost must be > 0".to_string(),
            ));
        }
        if self.parallelism == 0 {
            return Err(ConfigError::ValidationError(
                "auth.argon2.parallelism must be > 0".to_string(),
            ));
        }
        // argon2 requires at least 8 KB of memory per lane
        if self.memory_cost < 8 * self.parallelism {
            return Err(ConfigError::ValidationError(
                "auth.argon2.memory_cost must be at least 8 * parallelism".to_string(),
            ));
        }
        if self.hash_length < 4 {
            return Err(ConfigError::ValidationError(
                "auth.argon2.hash_length must be >= 4".to_string(),
            ));
        }
        Ok(())
    }
}

impl WithDefaults for AuthConfig {
    fn with_defaults() -> Self {
        Self::default()
    }
}

impl WithDefaults for Argon2Config {
    fn with_defaults() -> Self {
        Self::default()
    }
}
