use std::sync::Arc;
use std::time::Duration;

use actix_web::cookie::{SameSite, time};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};

use crate::cache::{Cache, CacheKey, LocalCache};
use crate::config::{AuthConfig, MAX_SESSION_LIFETIME};
use crate::entities::{sessions, users};
use crate::prelude::*;

/// What a request knows about its logged-in user.
///
/// Cached per session key so most requests never touch the sessions table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub is_staff: bool,
    pub expired_at: NaiveDateTime,
}

impl SessionUser {
    fn new(session: &sessions::Model, user: &users::Model) -> Self {
        Self {
            session_id: session.id,
            user_id: user.id,
            username: user.username.clone(),
            is_staff: user.is_staff,
            expired_at: session.expired_at,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expired_at <= now()
    }
}

/// Server-side session store.
///
/// Rows in `sessions` are the source of truth; resolved sessions are kept in
/// the local cache for a few minutes. The cookie only carries the random
/// session key.
#[derive(Clone)]
pub struct Sessions {
    cache: Arc<LocalCache>,
    cookie_name: String,
    secure_cookie: bool,
    lifetime: chrono::Duration,
    cache_ttl: Duration,
}

impl Sessions {
    pub fn new(cache: Arc<LocalCache>, config: &AuthConfig) -> Self {
        Self {
            cache,
            cookie_name: config.session_cookie.clone(),
            secure_cookie: config.secure_cookie,
            lifetime: Self::lifetime(config.session_lifetime),
            cache_ttl: Duration::from_secs(config.session_cache_ttl),
        }
    }

    /// Lifetimes beyond [`MAX_SESSION_LIFETIME`] are clamped to it.
    fn lifetime(seconds: u64) -> chrono::Duration {
        i64::try_from(seconds.min(MAX_SESSION_LIFETIME))
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(chrono::Duration::MAX)
    }

    /// Session key carried by the request, if it parses.
    pub fn session_id(&self, req: &HttpRequest) -> Option<Uuid> {
        req.cookie(&self.cookie_name)
            .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
    }

    #[::tracing::instrument(skip(self, db, user), fields(user_id = %user.id))]
    pub async fn start(
        &self,
        db: &DatabaseConnection,
        user: &users::Model,
    ) -> Result<SessionUser, DbErr> {
        let session = sessions::Model::create(db, user, self.lifetime).await?;
        let session_user = SessionUser::new(&session, user);

        self.remember(&session_user).await;

        ::tracing::info!(session_id = %session.id, "Session started");

        Ok(session_user)
    }

    /// Cache first, then the database. Expired sessions resolve to `None`.
    #[::tracing::instrument(skip(self, db))]
    pub async fn resolve(
        &self,
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<Option<SessionUser>, DbErr> {
        let key = CacheKey::session(id);

        match self.cache.get::<SessionUser>(&key).await {
            Ok(Some(session)) if !session.is_expired() => {
                ::tracing::debug!("Session cache hit");

                return Ok(Some(session));
            }
            Ok(_) => ::tracing::debug!("Session cache miss"),
            Err(e) => ::tracing::error!(error = %e, "Failed to read session from cache"),
        }

        let Some((session, user)) = sessions::Model::find_active(db, id).await? else {
            return Ok(None);
        };
        let session_user = SessionUser::new(&session, &user);

        self.remember(&session_user).await;

        Ok(Some(session_user))
    }

    #[::tracing::instrument(skip(self, db))]
    pub async fn destroy(&self, db: &DatabaseConnection, id: Uuid) -> Result<(), DbErr> {
        if let Err(e) = self.cache.delete(&CacheKey::session(id)).await {
            ::tracing::error!(error = %e, "Failed to remove session from cache");
        }

        sessions::Model::destroy(db, id).await?;

        ::tracing::info!("Session destroyed");

        Ok(())
    }

    pub async fn purge_expired(&self, db: &DatabaseConnection) -> Result<u64, DbErr> {
        let removed = sessions::Model::purge_expired(db).await?;

        if removed > 0 {
            ::tracing::info!(removed, "Purged expired sessions");
        }

        Ok(removed)
    }

    pub fn cookie(&self, session: &SessionUser) -> Cookie<'static> {
        Cookie::build(self.cookie_name.clone(), session.session_id.to_string())
            .path("/")
            .http_only(true)
            .secure(self.secure_cookie)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::seconds(self.lifetime.num_seconds()))
            .finish()
    }

    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(self.cookie_name.clone(), "")
            .path("/")
            .http_only(true)
            .secure(self.secure_cookie)
            .same_site(SameSite::Lax)
            .finish();

        cookie.make_removal();

        cookie
    }

    /// Cache entries never outlive the session itself.
    async fn remember(&self, session: &SessionUser) {
        let remaining = (session.expired_at - now())
            .to_std()
            .unwrap_or(Duration::ZERO);
        let ttl = remaining.min(self.cache_ttl);

        if ttl.is_zero() {
            return;
        }

        if let Err(e) = self
            .cache
            .set(&CacheKey::session(session.session_id), session, ttl)
            .await
        {
            ::tracing::error!(error = %e, "Failed to cache session");
        }
    }
}
