use crate::metrics::AppMetrics;
use crate::middlewares::auth::{CurrentUser, Sessions};
use crate::middlewares::flash::FlashMessages;
use crate::prelude::*;
use crate::requests::{LoginRequest, RegisterRequest};
use crate::security::{IpRateLimiter, PasswordHasher};
use crate::services;

#[get("/register")]
pub async fn register_form(current: CurrentUser, flash: FlashMessages) -> impl Responder {
    services::auth::register::form(current, flash)
}

/// Create an account and log it in
#[post("/register")]
pub async fn register(
    db: Data<DatabaseConnection>,
    hasher: Data<PasswordHasher>,
    sessions: Data<Sessions>,
    metrics: Data<AppMetrics>,
    current: CurrentUser,
    flash: FlashMessages,
    Form(request): Form<RegisterRequest>,
) -> Result<impl Responder, Error> {
    services::auth::register(&db, &hasher, &sessions, &metrics, current, flash, request).await
}

/// Log in and return to the catalogue
///
/// Fail if:
/// - too many attempts from the same address (429)
#[post("/login")]
pub async fn login(
    req: HttpRequest,
    db: Data<DatabaseConnection>,
    hasher: Data<PasswordHasher>,
    sessions: Data<Sessions>,
    limiter: Data<IpRateLimiter>,
    metrics: Data<AppMetrics>,
    Form(request): Form<LoginRequest>,
) -> Result<impl Responder, Error> {
    services::auth::login(&req, &db, &hasher, &sessions, &limiter, &metrics, request).await
}

#[route("/logout", method = "GET", method = "POST")]
pub async fn logout(
    req: HttpRequest,
    db: Data<DatabaseConnection>,
    sessions: Data<Sessions>,
) -> Result<impl Responder, Error> {
    services::auth::logout(&req, &db, &sessions).await
}
