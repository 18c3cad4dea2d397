use crate::metrics::{AppMetrics, LoginOutcome};
use crate::middlewares::auth::Sessions;
use crate::prelude::*;
use crate::requests::LoginRequest;
use crate::responses::Redirect;
use crate::security::{IpRateLimiter, PasswordHasher, client_ip};

use super::helpers::authenticate;

pub const THROTTLED: &str = "Too many login attempts. Try again later.";
pub const WRONG_CREDENTIALS: &str = "Wrong username or password.";

/// Logs the visitor in and always lands back on the catalogue.
///
/// A successful login always gets a fresh session key and the one the
/// browser carried before is destroyed, so a planted key never becomes
/// authenticated. Failed attempts leave the current session alone.
#[::tracing::instrument(skip_all, fields(username = %request.username))]
pub async fn login(
    req: &HttpRequest,
    db: &DatabaseConnection,
    hasher: &PasswordHasher,
    sessions: &Sessions,
    limiter: &IpRateLimiter,
    metrics: &AppMetrics,
    request: LoginRequest,
) -> Result<Redirect, Error> {
    if let Err(wait) = limiter.check(client_ip(req)) {
        metrics.record_login_attempt(LoginOutcome::Throttled);

        return Err(Error::TooManyRequests {
            message: THROTTLED.to_string(),
            retry_after: wait.as_secs().max(1),
        });
    }

    let session = authenticate(db, hasher, sessions, &request.username, &request.password).await?;

    match session {
        Some(session) => {
            if let Some(previous) = sessions.session_id(req) {
                sessions.destroy(db, previous).await?;
            }

            metrics.record_login_attempt(LoginOutcome::Success);
            ::tracing::info!(user_id = %session.user_id, "User logged in");

            Ok(Redirect::to("/").cookie(sessions.cookie(&session)))
        }
        None => {
            metrics.record_login_attempt(LoginOutcome::Failure);

            Ok(Redirect::to("/").error(WRONG_CREDENTIALS))
        }
    }
}
