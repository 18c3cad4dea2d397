//! End-to-end tests against the full router.

pub mod auth_flow;
pub mod health_test;
pub mod security_headers_test;
pub mod statistics_test;

use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use bookstore::middlewares::flash::{self, Message};

/// Flash messages set by a response.
pub fn messages<B>(res: &ServiceResponse<B>) -> Vec<Message> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == flash::COOKIE)
        .map(|cookie| flash::decode(cookie.value()))
        .unwrap_or_default()
}

pub fn location<B>(res: &ServiceResponse<B>) -> &str {
    res.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}
