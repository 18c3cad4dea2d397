use std::fmt;

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use thiserror::Error;

use crate::middlewares::flash::{self, FlashMessages, Message};
use crate::templates;

/// Errors surfaced to the browser.
///
/// Every variant renders as an HTML page except [`Error::LoginRequired`],
/// which sends the visitor back to the catalogue where the login form lives.
/// It carries the flash messages still pending on the request so the
/// redirect does not drop them.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Log in to see this page.")]
    LoginRequired { pending: FlashMessages },

    #[error("{message}")]
    Forbidden { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    TooManyRequests { message: String, retry_after: u64 },

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl Error {
    pub fn login_required(pending: FlashMessages) -> Self {
        Self::LoginRequired { pending }
    }

    pub fn forbidden<T: ToString>(message: T) -> Self {
        Self::Forbidden {
            message: message.to_string(),
        }
    }

    pub fn not_found<T: ToString>(message: T) -> Self {
        Self::NotFound {
            message: message.to_string(),
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::LoginRequired { .. } => StatusCode::SEE_OTHER,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::TooManyRequests { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        match self {
            Self::LoginRequired { pending } => {
                let mut messages = pending.clone();

                messages.push(Message::error(self.to_string()));

                HttpResponse::SeeOther()
                    .insert_header((header::LOCATION, "/"))
                    .cookie(flash::cookie(messages.as_slice()))
                    .finish()
            }
            Self::Database(e) => {
                ::tracing::error!(error = %e, "Database error while handling request");

                page(status, "Something went wrong on our side.")
            }
            Self::Internal(e) => {
                ::tracing::error!(error = ?e, "Internal error while handling request");

                page(status, "Something went wrong on our side.")
            }
            Self::TooManyRequests { retry_after, .. } => {
                let mut response = page(status, &self.to_string());

                if let Ok(value) = header::HeaderValue::from_str(&retry_after.to_string()) {
                    response.headers_mut().insert(header::RETRY_AFTER, value);
                }

                response
            }
            Self::Forbidden { message } | Self::NotFound { message } => page(status, message),
        }
    }
}

fn page(status: StatusCode, message: &str) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(templates::error::render(status, message))
}

/// Ordered collection of field validation failures.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Validation {
    errors: Vec<(String, String)>,
}

impl Validation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<F: ToString, M: ToString>(&mut self, field: F, message: M) {
        self.errors.push((field.to_string(), message.to_string()));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The first message recorded, which is what the forms display.
    pub fn first(&self) -> Option<&str> {
        self.messages().next()
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|(_, message)| message.as_str())
    }
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages = self
            .errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>();

        write!(f, "{}", messages.join(", "))
    }
}
