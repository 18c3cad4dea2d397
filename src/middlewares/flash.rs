//! One-shot messages carried across a redirect in a cookie.
//!
//! Handlers queue messages on a [`Redirect`](crate::responses::Redirect) and
//! the next rendered [`Page`](crate::responses::Page) displays and clears them.

use std::future::{Ready, ready};

use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};

pub const COOKIE: &str = "messages";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub level: Level,
    pub text: String,
}

impl Message {
    pub fn error<T: ToString>(text: T) -> Self {
        Self {
            level: Level::Error,
            text: text.to_string(),
        }
    }
}

/// Messages queued by the previous response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlashMessages(pub Vec<Message>);

impl FlashMessages {
    pub fn read(req: &HttpRequest) -> Self {
        let Some(cookie) = req.cookie(COOKIE) else {
            return Self::default();
        };

        Self(decode(cookie.value()))
    }

    pub fn push(&mut self, message: Message) {
        self.0.push(message);
    }

    pub fn as_slice(&self) -> &[Message] {
        &self.0
    }
}

impl FromRequest for FlashMessages {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(Self::read(req)))
    }
}

pub fn encode(messages: &[Message]) -> String {
    let json = serde_json::to_string(messages).unwrap_or_else(|_| "[]".to_string());

    urlencoding::encode(&json).into_owned()
}

/// Malformed cookies decode to no messages at all.
pub fn decode(value: &str) -> Vec<Message> {
    let Ok(json) = urlencoding::decode(value) else {
        return Vec::new();
    };

    serde_json::from_str(&json).unwrap_or_else(|e| {
        ::tracing::debug!(error = %e, "Ignoring malformed flash message cookie");

        Vec::new()
    })
}

pub fn cookie(messages: &[Message]) -> Cookie<'static> {
    Cookie::build(COOKIE, encode(messages))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

pub fn removal() -> Cookie<'static> {
    let mut cookie = Cookie::build(COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish();

    cookie.make_removal();
    cookie
}
