use serde::{Deserialize, Serialize};

use super::{ConfigError, Validate, WithDefaults};

/// Security configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Login attempt throttling
    #[serde(default = "RateLimitConfig::default")]
    pub rate_limit: RateLimitConfig,
    /// Security headers configuration
    #[serde(default = "SecurityHeadersConfig::default")]
    pub headers: SecurityHeadersConfig,
}

/// Per-IP throttling of login attempts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_rate_limit_enabled")]
    pub enabled: bool,
    /// Attempts replenished per window
    #[serde(default = "default_rate_limit_requests")]
    pub requests: u32,
    /// Time window in seconds
    #[serde(default = "default_rate_limit_window")]
    pub window: u64,
    /// Attempts allowed back to back before throttling starts
    #[serde(default = "default_rate_limit_burst")]
    pub burst: u32,
}

/// Security headers configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityHeadersConfig {
    #[serde(default = "default_headers_enabled")]
    pub enabled: bool,
    /// Content Security Policy
    #[serde(default = "default_headers_csp")]
    pub csp: String,
    /// HSTS max age in seconds
    #[serde(default = "default_headers_hsts_max_age")]
    pub hsts_max_age: u64,
    #[serde(default = "default_headers_x_frame_options")]
    pub x_frame_options: String,
    #[serde(default = "default_headers_x_content_type_options")]
    pub x_content_type_options: String,
    #[serde(default = "default_headers_referrer_policy")]
    pub referrer_policy: String,
}

fn default_rate_limit_enabled() -> bool {
    true
}

fn default_rate_limit_requests() -> u32 {
    5
}

fn default_rate_limit_window() -> u64 {
    60 // 1 minute
}

fn default_rate_limit_burst() -> u32 {
    5
}

fn default_headers_enabled() -> bool {
    true
}

fn default_headers_csp() -> String {
    "default-src 'self'; form-action 'self'; frame-ancestors 'none'".to_string()
}

fn default_headers_hsts_max_age() -> u64 {
    31536000 // 1 year
}

fn default_headers_x_frame_options() -> String {
    "DENY".to_string()
}

fn default_headers_x_content_type_options() -> String {
    "nosniff".to_string()
}

fn default_headers_referrer_policy() -> String {
    "same-origin".to_string()
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_rate_limit_enabled(),
            requests: default_rate_limit_requests(),
            window: default_rate_limit_window(),
            burst: default_rate_limit_burst(),
        }
    }
}

impl Default for SecurityHeadersConfig {
    fn default() -> Self {
        Self {
            enabled: default_headers_enabled(),
            csp: default_headers_csp(),
            hsts_max_age: default_headers_hsts_max_age(),
            x_frame_options: default_headers_x_frame_options(),
            x_content_type_options: default_headers_x_content_type_options(),
            referrer_policy: default_headers_referrer_policy(),
        }
    }
}

impl Validate for SecurityConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.rate_limit.validate()?;
        self.headers.validate()?;
        Ok(())
    }
}

impl Validate for RateLimitConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.enabled {
            return Ok(());
        }
        if self.requests == 0 {
            return Err(ConfigError::ValidationError(
                "security.rate_limit.requests must be > 0 when rate limiting is enabled"
                    .to_string(),
            ));
        }
        if self.window == 0 {
            return Err(ConfigError::ValidationError(
                "security.rate_limit.window must be > 0 when rate limiting is enabled".to_string(),
            ));
        }
        if self.burst == 0 {
            return Err(ConfigError::ValidationError(
                "security.rate_limit.burst must be > 0 when rate limiting is enabled".to_string(),
            ));
        }
        Ok(())
    }
}

impl Validate for SecurityHeadersConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.csp.is_empty() {
            return Err(ConfigError::ValidationError(
                "security.headers.csp cannot be empty when security headers are enabled"
                    .to_string(),
            ));
        }
        if self.hsts_max_age == 0 {
            return Err(ConfigError::ValidationError(
                "security.headers.hsts_max_age must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl WithDefaults for SecurityConfig {
    fn with_defaults() -> Self {
        Self::default()
    }
}
