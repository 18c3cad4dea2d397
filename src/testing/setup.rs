use sea_orm::{ActiveModelTrait, Set};

use crate::config::{AppConfig, Argon2Config, WithDefaults};
use crate::database;
use crate::entities::users;
use crate::prelude::*;
use crate::security::PasswordHasher;
use crate::state::AppState;

/// Password of every user made by [`create_test_user`].
pub const PASSWORD: &str = "Sup3r-Secret!";

/// Returns an in-memory SQLite database with all migrations applied
///
/// Each call opens a fresh database, so tests never see each other's rows.
/// The seeded catalogue is present; no admin is seeded unless
/// `BOOKSTORE_ADMIN_PASSWORD` is set.
///
/// # Panics
/// Panics if the connection or the migrations fail.
pub async fn database() -> DatabaseConnection {
    let db = database::memory()
        .await
        .expect("Failed to connect to in-memory database");

    database::migrate(&db)
        .await
        .expect("Failed to run migrations");

    db
}

/// Argon2 parameters cheap enough for tests
pub fn argon2() -> Argon2Config {
    Argon2Config {
        memory_cost: 19456,
        time_cost: 1,
        parallelism: 1,
        hash_length: 32,
    }
}

pub fn password_hasher() -> PasswordHasher {
    PasswordHasher::from_config(&argon2()).expect("Invalid test Argon2 parameters")
}

/// Default configuration with [`argon2`] parameters
pub fn config() -> AppConfig {
    let mut config = AppConfig::with_defaults();

    config.auth.argon2 = argon2();

    config
}

/// Application state over a fresh [`database`]
pub async fn state() -> AppState {
    let db = database().await;

    AppState::new(db, &config()).expect("Failed to build application state")
}

/// Inserts a user with a unique username and [`PASSWORD`] as password.
pub async fn create_test_user(
    db: &DatabaseConnection,
    hasher: &PasswordHasher,
    is_staff: bool,
) -> users::Model {
    let suffix = Uuid::new_v4().simple().to_string();
    let password = hasher.hash(PASSWORD).expect("Failed to hash password");

    users::ActiveModel {
        id: Set(Uuid::new_v4()),
        username: Set(format!("reader_{}", &suffix[..12])),
        password: Set(password),
        is_staff: Set(is_staff),
        created_at: Set(now()),
    }
    .insert(db)
    .await
    .expect("Failed to insert test user")
}
