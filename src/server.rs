use std::io::Error;
use std::time::Duration;

use actix_web::rt::task::JoinHandle;
use actix_web::{App, HttpServer, rt};

use crate::config::AppConfig;
use crate::metrics::MetricsMiddleware;
use crate::security::SecurityHeadersMiddleware;
use crate::state::AppState;
use crate::{database, router};

/// Connects, migrates, starts the background housekeeping and serves until shutdown.
pub async fn run(config: AppConfig) -> Result<(), Error> {
    let db = database::connect(&config.database)
        .await
        .map_err(Error::other)?;

    if config.database.run_migrations {
        database::migrate(&db).await.map_err(Error::other)?;
    }

    let state = AppState::new(db, &config).map_err(Error::other)?;

    purge_sessions(
        state.clone(),
        Duration::from_secs(config.auth.session_cleanup_interval),
    );
    sweep_rate_limiter(state.clone(), state.limiter.window());

    let headers = config.security.headers.clone();
    let auth = config.auth.clone();
    let swagger = config.api.swagger_enabled;
    let (host, port) = config.server.address();
    let workers = config.server.worker_count();

    ::tracing::info!(%host, port, workers, swagger, "Starting HTTP server");

    HttpServer::new(move || {
        let state = state.clone();

        App::new()
            .wrap(SecurityHeadersMiddleware::new(headers.clone()))
            .wrap(MetricsMiddleware::new(state.metrics.clone()))
            .configure(|app| state.configure(app))
            .configure(router::route)
            .configure(|app| {
                if swagger {
                    router::docs(app, &auth);
                }
            })
    })
    .workers(workers)
    .shutdown_timeout(config.app.shutdown_timeout)
    .bind((host, port))?
    .run()
    .await
}

/// Deletes expired session rows every `every`. A zero interval disables the task.
pub fn purge_sessions(state: AppState, every: Duration) -> Option<JoinHandle<()>> {
    if every.is_zero() {
        return None;
    }

    Some(rt::spawn(async move {
        let mut interval = rt::time::interval(every);

        loop {
            interval.tick().await;
            purge_sessions_once(&state).await;
        }
    }))
}

/// One purge pass. Returns how many rows were removed.
pub async fn purge_sessions_once(state: &AppState) -> u64 {
    match state.sessions.purge_expired(&state.db).await {
        Ok(removed) => {
            state.metrics.record_sessions_purged(removed);
            removed
        }
        Err(e) => {
            ::tracing::error!(error = %e, "Failed to purge expired sessions");
            0
        }
    }
}

/// Forgets idle login limiter entries every `every`. A zero interval disables the task.
pub fn sweep_rate_limiter(state: AppState, every: Duration) -> Option<JoinHandle<()>> {
    if every.is_zero() {
        return None;
    }

    Some(rt::spawn(async move {
        let mut interval = rt::time::interval(every);

        loop {
            interval.tick().await;
            state.metrics.set_rate_limit_tracked(state.limiter.sweep());
        }
    }))
}
