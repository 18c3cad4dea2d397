use actix_web::Either;

use crate::metrics::AppMetrics;
use crate::middlewares::auth::{CurrentUser, Sessions};
use crate::middlewares::flash::{FlashMessages, Message};
use crate::models::CreateUserError;
use crate::entities::users;
use crate::prelude::*;
use crate::requests::RegisterRequest;
use crate::responses::{Page, Redirect};
use crate::security::PasswordHasher;
use crate::templates;

use super::helpers::check_registration;

pub fn form(current: CurrentUser, flash: FlashMessages) -> Either<Redirect, Page> {
    if current.user().is_some() {
        return Either::Left(Redirect::to("/"));
    }

    Either::Right(Page::new(templates::register::render(flash.as_slice(), "")))
}

/// Creates the account and logs it in.
///
/// Failures re-render the form with the reason as an error message: the
/// first failed registration check, or the first account validation error.
#[::tracing::instrument(skip_all, fields(username = %request.username))]
pub async fn register(
    db: &DatabaseConnection,
    hasher: &PasswordHasher,
    sessions: &Sessions,
    metrics: &AppMetrics,
    current: CurrentUser,
    mut flash: FlashMessages,
    request: RegisterRequest,
) -> Result<Either<Redirect, Page>, Error> {
    if current.user().is_some() {
        return Ok(Either::Left(Redirect::to("/")));
    }

    let RegisterRequest {
        username,
        password1,
        password2,
    } = request;

    let problems = check_registration(db, &username, &password1, &password2).await?;

    if let Some(problem) = problems.into_iter().next() {
        flash.push(Message::error(problem));

        return Ok(Either::Right(rejected(&flash, &username)));
    }

    let user = match users::Model::create_user(db, hasher, &username, &password1).await {
        Ok(user) => user,
        Err(CreateUserError::Invalid(validation)) => {
            if let Some(first) = validation.first() {
                flash.push(Message::error(first));
            }

            return Ok(Either::Right(rejected(&flash, &username)));
        }
        Err(CreateUserError::Database(e)) => return Err(e.into()),
        Err(e) => return Err(anyhow::Error::new(e).context("Failed to create user").into()),
    };

    metrics.record_registration();

    let session = sessions.start(db, &user).await?;

    Ok(Either::Left(
        Redirect::to("/").cookie(sessions.cookie(&session)),
    ))
}

fn rejected(flash: &FlashMessages, username: &str) -> Page {
    Page::new(templates::register::render(flash.as_slice(), username))
}
