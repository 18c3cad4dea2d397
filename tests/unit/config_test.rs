//! Configuration loading tests
//!
//! These tests mutate process environment variables, so they run serially.

use bookstore::config::*;
use serial_test::serial;
use std::env;

mod utils {
    /// Remove every `BOOKSTORE__*` override and `APP_ENV`.
    pub fn clean_env_vars() {
        let keys: Vec<String> = std::env::vars()
            .filter(|(k, _)| k.starts_with("BOOKSTORE__"))
            .map(|(k, _)| k)
            .collect();

        for key in keys {
            unsafe { std::env::remove_var(&key) };
        }

        unsafe { std::env::remove_var("APP_ENV") };
    }
}

#[test]
#[serial]
fn test_load_default_config() {
    utils::clean_env_vars();

    let config = load();
    assert!(config.is_ok(), "Failed to load default configuration: {:?}", config.err());
    let config = config.unwrap();

    assert_eq!(config.app.name, "bookstore");
    assert_eq!(config.app.version, env!("CARGO_PKG_VERSION"));
    assert_eq!(config.app.environment, "development");

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8000);

    assert_eq!(config.auth.session_cookie, "sessionid");
    assert_eq!(config.auth.session_lifetime, 1_209_600);
    assert!(!config.auth.secure_cookie);
    assert_eq!(config.auth.argon2.memory_cost, 65536);
    assert_eq!(config.auth.argon2.time_cost, 3);
    assert_eq!(config.auth.argon2.parallelism, 4);

    assert!(config.security.rate_limit.enabled);
    assert_eq!(config.security.rate_limit.burst, 5);
    assert_eq!(config.security.headers.x_frame_options, "DENY");

    assert!(config.api.swagger_enabled);
}

#[test]
#[serial]
fn test_production_overrides() {
    utils::clean_env_vars();
    unsafe { env::set_var("APP_ENV", "production") };

    let config = load().unwrap();

    assert_eq!(config.app.environment, "production");
    assert_eq!(config.server.host, "0.0.0.0");
    assert!(config.auth.secure_cookie);
    assert!(matches!(config.observability.log_format, LogFormat::Json));
    assert!(!config.api.swagger_enabled);
    // Untouched sections keep their defaults
    assert_eq!(config.server.port, 8000);

    utils::clean_env_vars();
}

#[test]
#[serial]
fn test_env_vars_take_precedence() {
    utils::clean_env_vars();
    unsafe {
        env::set_var("APP_ENV", "production");
        env::set_var("BOOKSTORE__SERVER__PORT", "9090");
        env::set_var("BOOKSTORE__AUTH__SECURE_COOKIE", "false");
        env::set_var("BOOKSTORE__SECURITY__RATE_LIMIT__BURST", "10");
    }

    let config = load().unwrap();

    assert_eq!(config.server.port, 9090);
    assert!(!config.auth.secure_cookie);
    assert_eq!(config.security.rate_limit.burst, 10);
    assert_eq!(config.server.host, "0.0.0.0");

    utils::clean_env_vars();
}

#[test]
#[serial]
fn test_invalid_values_are_rejected() {
    utils::clean_env_vars();
    unsafe { env::set_var("BOOKSTORE__SERVER__PORT", "0") };

    let result = load();
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));

    utils::clean_env_vars();
    unsafe { env::set_var("BOOKSTORE__AUTH__ARGON2__PARALLELISM", "0") };

    let result = load();
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));

    utils::clean_env_vars();
    unsafe { env::set_var("BOOKSTORE__AUTH__SESSION_LIFETIME", "10000000000000") };

    let result = load();
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));

    utils::clean_env_vars();
}

#[test]
fn test_defaults_are_valid() {
    let config = AppConfig::with_defaults();

    assert!(config.validate().is_ok());
    assert_eq!(config.auth.session_cookie, "sessionid");
    assert_eq!(config.security.rate_limit.requests, 5);
}
