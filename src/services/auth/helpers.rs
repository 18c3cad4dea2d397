use sea_orm::DbErr;

use crate::entities::users;
use crate::middlewares::auth::{SessionUser, Sessions};
use crate::prelude::*;
use crate::security::PasswordHasher;

pub async fn get_user(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<users::Model>, DbErr> {
    users::Model::find_by_username(db, username).await
}

/// Checks the credentials and opens a session on success.
///
/// Unknown usernames still cost one argon2 verification, so the response
/// time does not tell whether an account exists. Hashes produced with older
/// parameters are upgraded on a successful login.
#[::tracing::instrument(skip(db, hasher, sessions, password))]
pub async fn authenticate(
    db: &DatabaseConnection,
    hasher: &PasswordHasher,
    sessions: &Sessions,
    username: &str,
    password: &str,
) -> Result<Option<SessionUser>, Error> {
    let Some(user) = get_user(db, username).await? else {
        hasher.verify_dummy(password);
        ::tracing::info!("Login failed: unknown username");

        return Ok(None);
    };

    let verified = hasher.verify(password, &user.password).unwrap_or_else(|e| {
        ::tracing::warn!(user_id = %user.id, error = %e, "Stored password hash is unreadable");

        false
    });

    if !verified {
        ::tracing::info!(user_id = %user.id, "Login failed: wrong password");

        return Ok(None);
    }

    let user = upgrade_hash(db, hasher, user, password).await;
    let session = sessions.start(db, &user).await?;

    Ok(Some(session))
}

async fn upgrade_hash(
    db: &DatabaseConnection,
    hasher: &PasswordHasher,
    user: users::Model,
    password: &str,
) -> users::Model {
    if !hasher.needs_rehash(&user.password).unwrap_or(false) {
        return user;
    }

    let hash = match hasher.hash(password) {
        Ok(hash) => hash,
        Err(e) => {
            ::tracing::error!(user_id = %user.id, error = %e, "Failed to rehash password");

            return user;
        }
    };

    match user.update_password(db, hash).await {
        Ok(updated) => {
            ::tracing::info!(user_id = %updated.id, "Password hash upgraded");

            updated
        }
        Err(e) => {
            ::tracing::error!(user_id = %user.id, error = %e, "Failed to store upgraded hash");

            user
        }
    }
}

/// Messages explaining why a registration cannot go ahead, stopping at the
/// first problem. Empty when the registration may proceed.
pub async fn check_registration(
    db: &DatabaseConnection,
    username: &str,
    password1: &str,
    password2: &str,
) -> Result<Vec<String>, DbErr> {
    if password1 != password2 {
        return Ok(vec!["Passwords do not match.".to_string()]);
    }

    if users::Model::username_exists(db, username).await? {
        return Ok(vec!["Username already registered.".to_string()]);
    }

    Ok(Vec::new())
}
