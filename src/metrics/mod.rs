pub mod middleware;

pub use middleware::MetricsMiddleware;

use std::sync::{Arc, OnceLock};

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

use crate::config::AppConfig;

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Outcome label of a login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    Failure,
    Throttled,
}

impl LoginOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Throttled => "throttled",
        }
    }
}

/// Handle on the process wide Prometheus recorder.
///
/// The recorder is installed once; every clone and every later
/// [`AppMetrics::new`] shares it.
#[derive(Clone)]
pub struct AppMetrics {
    prometheus_handle: Arc<PrometheusHandle>,
}

impl AppMetrics {
    pub fn new() -> Self {
        Self::with_config(None)
    }

    pub fn with_config(config: Option<&AppConfig>) -> Self {
        let handle = PROMETHEUS_HANDLE.get_or_init(|| Self::install(config));

        Self {
            prometheus_handle: Arc::new(handle.clone()),
        }
    }

    fn install(config: Option<&AppConfig>) -> PrometheusHandle {
        let mut builder = PrometheusBuilder::new();

        if let Some(cfg) = config {
            builder = builder
                .add_global_label("service", cfg.app.name.clone())
                .add_global_label("version", cfg.app.version.clone())
                .add_global_label("environment", cfg.app.environment.clone());
        }

        let builder = match builder.set_buckets_for_metric(
            Matcher::Full("http_requests_duration_seconds".to_string()),
            &[0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0],
        ) {
            Ok(builder) => builder,
            Err(e) => {
                ::tracing::warn!(error = %e, "Falling back to summary for request durations");
                PrometheusBuilder::new()
            }
        };

        Self::describe_metrics();

        match builder.install_recorder() {
            Ok(handle) => handle,
            Err(e) => {
                // Another recorder owns the process; keep a private one so
                // rendering still works.
                ::tracing::warn!(error = %e, "Failed to install Prometheus recorder");
                PrometheusBuilder::new().build_recorder().handle()
            }
        }
    }

    fn describe_metrics() {
        describe_counter!("http_requests_total", "Total number of HTTP requests");
        describe_histogram!(
            "http_requests_duration_seconds",
            "HTTP request duration in seconds"
        );
        describe_gauge!(
            "http_requests_in_flight",
            "Number of HTTP requests currently being processed"
        );

        describe_counter!("auth_login_attempts_total", "Login attempts by outcome");
        describe_counter!("auth_registrations_total", "Accounts created");
        describe_counter!("auth_sessions_purged_total", "Expired sessions removed");
        describe_gauge!(
            "auth_rate_limit_tracked_ips",
            "Client addresses currently tracked by the login limiter"
        );

        describe_counter!("comments_posted_total", "Comments stored");
        describe_gauge!("users_total", "Total number of users in the system");
    }

    pub fn record_http_request(&self, method: &str, path: &str, status: u16, duration_secs: f64) {
        counter!(
            "http_requests_total",
            "method" => method.to_string(),
            "path" => path.to_string(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            "http_requests_duration_seconds",
            "method" => method.to_string(),
            "path" => path.to_string()
        )
        .record(duration_secs);
    }

    pub fn http_request_start(&self) {
        gauge!("http_requests_in_flight").increment(1.0);
    }

    pub fn http_request_end(&self) {
        gauge!("http_requests_in_flight").decrement(1.0);
    }

    pub fn record_login_attempt(&self, outcome: LoginOutcome) {
        counter!("auth_login_attempts_total", "outcome" => outcome.as_str()).increment(1);
    }

    pub fn record_registration(&self) {
        counter!("auth_registrations_total").increment(1);
    }

    pub fn record_sessions_purged(&self, count: u64) {
        counter!("auth_sessions_purged_total").increment(count);
    }

    pub fn set_rate_limit_tracked(&self, count: usize) {
        gauge!("auth_rate_limit_tracked_ips").set(count as f64);
    }

    pub fn record_comment(&self) {
        counter!("comments_posted_total").increment(1);
    }

    pub fn set_users_total(&self, count: u64) {
        gauge!("users_total").set(count as f64);
    }

    pub fn render(&self) -> String {
        self.prometheus_handle.render()
    }
}

impl Default for AppMetrics {
    fn default() -> Self {
        Self::new()
    }
}
