use std::sync::Arc;

use anyhow::Context;

use crate::cache::LocalCache;
use crate::config::AppConfig;
use crate::metrics::AppMetrics;
use crate::middlewares::auth::Sessions;
use crate::prelude::*;
use crate::security::{IpRateLimiter, PasswordHasher};

/// Everything the handlers pull out of `app_data`.
///
/// Built once per process and cloned into every worker, so all workers share
/// the same session cache, login limiter and metrics recorder.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub sessions: Sessions,
    pub hasher: Arc<PasswordHasher>,
    pub limiter: Arc<IpRateLimiter>,
    pub metrics: AppMetrics,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: &AppConfig) -> anyhow::Result<Self> {
        let hasher = PasswordHasher::from_config(&config.auth.argon2)
            .map_err(|e| anyhow::anyhow!(e))
            .context("Invalid Argon2 parameters")?;

        Ok(Self {
            db,
            sessions: Sessions::new(Arc::new(LocalCache::new()), &config.auth),
            hasher: Arc::new(hasher),
            limiter: Arc::new(IpRateLimiter::new(config.security.rate_limit.clone())),
            metrics: AppMetrics::with_config(Some(config)),
        })
    }

    pub fn configure(&self, app: &mut ServiceConfig) {
        app.app_data(Data::new(self.db.clone()));
        app.app_data(Data::new(self.sessions.clone()));
        app.app_data(Data::from(self.hasher.clone()));
        app.app_data(Data::from(self.limiter.clone()));
        app.app_data(Data::new(self.metrics.clone()));
    }
}
