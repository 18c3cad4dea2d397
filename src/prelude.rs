//! Imports shared by controllers, services and models.

pub use actix_web::body::BoxBody;
pub use actix_web::cookie::Cookie;
pub use actix_web::http::StatusCode;
pub use actix_web::web::{self, Data, Form, Json, Path, ServiceConfig};
pub use actix_web::{HttpRequest, HttpResponse, Responder};
pub use chrono::NaiveDateTime;
pub use sea_orm::DatabaseConnection;
pub use uuid::Uuid;

pub use crate::errors::{Error, Validation};

/// Current UTC time without offset, the representation every timestamp column uses.
pub fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}
