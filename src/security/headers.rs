//! # Security Headers Middleware
//!
//! Adds the browser hardening headers to every response: the content
//! security policy that keeps injected markup inert, HSTS, framing and
//! sniffing protection and the referrer policy.
//!
//! ## Example
//!
//! ```rust,no_run
//! use bookstore::config::SecurityHeadersConfig;
//! use bookstore::security::SecurityHeadersMiddleware;
//! use actix_web::{App, HttpServer};
//!
//! #[actix_web::main]
//! async fn main() {
//!     let config = SecurityHeadersConfig::default();
//!
//!     HttpServer::new(move || {
//!         App::new().wrap(SecurityHeadersMiddleware::new(config.clone()))
//!     })
//!     .bind("127.0.0.1:8000")
//!     .unwrap()
//!     .run()
//!     .await
//!     .unwrap()
//! }
//! ```

use std::future::{Ready, ready};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::{self, HeaderMap, HeaderName, HeaderValue};
use futures_util::future::LocalBoxFuture;

use crate::config::SecurityHeadersConfig;

pub struct SecurityHeadersMiddleware {
    config: SecurityHeadersConfig,
}

impl SecurityHeadersMiddleware {
    pub fn new(config: SecurityHeadersConfig) -> Self {
        Self { config }
    }
}

impl Default for SecurityHeadersMiddleware {
    fn default() -> Self {
        Self::new(SecurityHeadersConfig::default())
    }
}

impl<S, B> Transform<S, ServiceRequest> for SecurityHeadersMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SecurityHeadersMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SecurityHeadersMiddlewareService {
            service,
            config: self.config.clone(),
        }))
    }
}

pub struct SecurityHeadersMiddlewareService<S> {
    service: S,
    config: SecurityHeadersConfig,
}

impl<S, B> Service<ServiceRequest> for SecurityHeadersMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let config = self.config.clone();
        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;

            if config.enabled {
                apply(res.headers_mut(), &config);
            }

            Ok(res)
        })
    }
}

fn apply(headers: &mut HeaderMap, config: &SecurityHeadersConfig) {
    insert(
        headers,
        header::CONTENT_SECURITY_POLICY,
        &config.csp,
        "default-src 'self'",
    );

    if config.hsts_max_age > 0 {
        insert(
            headers,
            header::STRICT_TRANSPORT_SECURITY,
            &format!("max-age={}; includeSubDomains", config.hsts_max_age),
            "max-age=31536000; includeSubDomains",
        );
    }

    insert(
        headers,
        header::X_FRAME_OPTIONS,
        &config.x_frame_options,
        "DENY",
    );
    insert(
        headers,
        header::X_CONTENT_TYPE_OPTIONS,
        &config.x_content_type_options,
        "nosniff",
    );
    insert(
        headers,
        header::REFERRER_POLICY,
        &config.referrer_policy,
        "same-origin",
    );
    headers.insert(
        HeaderName::from_static("x-permitted-cross-domain-policies"),
        HeaderValue::from_static("none"),
    );
}

/// Empty values switch a header off; unparsable ones fall back to `fallback`.
fn insert(headers: &mut HeaderMap, name: HeaderName, value: &str, fallback: &'static str) {
    if value.is_empty() {
        return;
    }

    let value = HeaderValue::from_str(value).unwrap_or_else(|_| {
        ::tracing::warn!(header = %name, "Invalid security header value, using fallback");

        HeaderValue::from_static(fallback)
    });

    headers.insert(name, value);
}
