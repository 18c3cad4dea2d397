//! # Login Throttling
//!
//! Per-IP rate limiting of login attempts using `governor`'s keyed limiter:
//! `burst` attempts back to back, then one more every `window / requests`
//! seconds. Addresses whose budget has fully replenished are dropped by
//! [`IpRateLimiter::sweep`].

use std::net::{IpAddr, Ipv4Addr};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use actix_web::HttpRequest;
use governor::clock::{Clock, DefaultClock};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};

use crate::config::RateLimitConfig;

/// Per-IP rate limiter with thread-safe tracking
#[derive(Clone)]
pub struct IpRateLimiter {
    limiter: Arc<DefaultKeyedRateLimiter<IpAddr>>,
    enabled: bool,
    window: Duration,
}

impl IpRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            limiter: Arc::new(RateLimiter::dashmap(Self::quota(&config))),
            enabled: config.enabled,
            window: Duration::from_secs(config.window.max(1)),
        }
    }

    fn quota(config: &RateLimitConfig) -> Quota {
        let period = Duration::from_secs(config.window) / config.requests.max(1);
        let burst = NonZeroU32::new(config.burst).unwrap_or(NonZeroU32::MIN);

        Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
            .allow_burst(burst)
    }

    /// Record an attempt from `ip`.
    ///
    /// Returns how long the client has to wait when the attempt is refused.
    #[tracing::instrument(skip(self), fields(ip = %ip))]
    pub fn check(&self, ip: IpAddr) -> Result<(), Duration> {
        if !self.enabled {
            return Ok(());
        }

        match self.limiter.check_key(&ip) {
            Ok(_) => Ok(()),
            Err(not_until) => {
                let wait_time = not_until.wait_time_from(DefaultClock::default().now());

                ::tracing::warn!(retry_after = ?wait_time, "Login rate limit exceeded");

                Err(wait_time)
            }
        }
    }

    /// Drops addresses indistinguishable from a fresh one and returns how
    /// many are still tracked.
    pub fn sweep(&self) -> usize {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();

        let tracked = self.limiter.len();

        ::tracing::debug!(tracked, "Swept login rate limiter");

        tracked
    }

    /// Interval at which [`sweep`](Self::sweep) is worth running.
    pub fn window(&self) -> Duration {
        self.window
    }
}

/// Peer address first, then the first `X-Forwarded-For` hop.
pub fn client_ip(req: &HttpRequest) -> IpAddr {
    req.peer_addr().map(|addr| addr.ip()).unwrap_or_else(|| {
        req.headers()
            .get("X-Forwarded-For")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split(',').next())
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
    })
}
