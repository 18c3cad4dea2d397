use std::ops::Deref;

use actix_web::FromRequest;
use actix_web::dev::Payload;
use futures_util::future::LocalBoxFuture;

use crate::middlewares::flash::FlashMessages;
use crate::prelude::*;

use super::{SessionUser, Sessions};

/// The logged-in user, if any. Never fails on a missing or stale session.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub Option<SessionUser>);

/// A logged-in user. Anonymous requests are sent back to the catalogue.
#[derive(Clone, Debug)]
pub struct Auth(pub SessionUser);

/// A logged-in staff member. Other users get a 403 page.
#[derive(Clone, Debug)]
pub struct Staff(pub SessionUser);

impl CurrentUser {
    pub fn user(&self) -> Option<&SessionUser> {
        self.0.as_ref()
    }
}

impl Deref for Auth {
    type Target = SessionUser;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Deref for Staff {
    type Target = SessionUser;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

async fn resolve(
    sessions: Option<Data<Sessions>>,
    db: Option<Data<DatabaseConnection>>,
    id: Option<Uuid>,
) -> Result<Option<SessionUser>, Error> {
    let (Some(sessions), Some(db)) = (sessions, db) else {
        ::tracing::error!("Session store or database connection is not registered");

        return Err(anyhow::anyhow!("Session store is not configured").into());
    };

    let Some(id) = id else {
        return Ok(None);
    };

    Ok(sessions.resolve(&db, id).await?)
}

fn lookup(req: &HttpRequest) -> LocalBoxFuture<'static, Result<Option<SessionUser>, Error>> {
    let sessions = req.app_data::<Data<Sessions>>().cloned();
    let db = req.app_data::<Data<DatabaseConnection>>().cloned();
    let id = sessions.as_ref().and_then(|s| s.session_id(req));

    Box::pin(resolve(sessions, db, id))
}

impl FromRequest for CurrentUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let fut = lookup(req);

        Box::pin(async move { Ok(Self(fut.await?)) })
    }
}

impl FromRequest for Auth {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let fut = lookup(req);
        let pending = FlashMessages::read(req);

        Box::pin(async move {
            match fut.await? {
                Some(user) => Ok(Self(user)),
                None => Err(Error::login_required(pending)),
            }
        })
    }
}

impl FromRequest for Staff {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let fut = lookup(req);
        let pending = FlashMessages::read(req);

        Box::pin(async move {
            match fut.await? {
                Some(user) if user.is_staff => Ok(Self(user)),
                Some(user) => {
                    ::tracing::warn!(user_id = %user.user_id, "Non-staff user refused");

                    Err(Error::forbidden(
                        "You do not have permission to access this page.",
                    ))
                }
                None => Err(Error::login_required(pending)),
            }
        })
    }
}
