#[macro_use(get, post, route)]
extern crate actix_web;

pub mod api;
pub mod cache;
pub mod config;
pub mod controllers;
pub mod database;
pub mod entities;
pub mod errors;
pub mod metrics;
pub mod middlewares;
pub mod models;
pub mod prelude;
pub mod requests;
pub mod responses;
pub mod router;
pub mod security;
pub mod server;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod templates;

// Testing utilities (always available for integration tests)
pub mod testing;

pub use cache::{Cache, CacheKey, LocalCache};
pub use errors::{Error, Validation};
pub use metrics::{AppMetrics, MetricsMiddleware};
pub use middlewares::auth::{Auth, CurrentUser, SessionUser, Sessions, Staff};
pub use security::{IpRateLimiter, PasswordHasher, SecurityHeadersMiddleware};
pub use state::AppState;
