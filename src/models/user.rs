use sea_orm::prelude::*;
use sea_orm::{ActiveValue::Set, SqlErr};
use thiserror::Error;

use crate::entities::users::{ActiveModel, Column, Entity, Model};
use crate::prelude::*;
use crate::security::{PasswordHasher, Validator};

/// Why an account could not be created.
#[derive(Debug, Error)]
pub enum CreateUserError {
    #[error("{0}")]
    Invalid(Validation),

    #[error("Failed to hash password: {0}")]
    Hash(argon2::password_hash::Error),

    #[error(transparent)]
    Database(#[from] DbErr),
}

impl Model {
    pub async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<Self>, DbErr> {
        Entity::find_by_id(id).one(db).await.inspect_err(|e| {
            ::tracing::error!(error = %e, "Failed to find user by id");
        })
    }

    pub async fn find_by_username<T: AsRef<str>>(
        db: &DatabaseConnection,
        username: T,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::Username.eq(username.as_ref()))
            .one(db)
            .await
            .inspect_err(|e| {
                ::tracing::error!(error = %e, "Failed to find user by username");
            })
    }

    pub async fn username_exists<T: AsRef<str>>(
        db: &DatabaseConnection,
        username: T,
    ) -> Result<bool, DbErr> {
        let count = Entity::find()
            .filter(Column::Username.eq(username.as_ref()))
            .count(db)
            .await?;

        Ok(count > 0)
    }

    pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        Entity::find().count(db).await
    }

    pub async fn store(&self, db: &DatabaseConnection) -> Result<Self, DbErr> {
        ActiveModel::from(self.clone()).insert(db).await
    }

    pub async fn update_password<T: Into<String>>(
        &self,
        db: &DatabaseConnection,
        hash: T,
    ) -> Result<Self, DbErr> {
        let mut model = ActiveModel::from(self.clone());

        model.password = Set(hash.into());

        model.update(db).await
    }

    /// Validates, hashes and stores a new non-staff account.
    ///
    /// Username rules stop at the first failure; password rules are all
    /// reported. A username taken between the existence check and the insert
    /// is caught by the unique index and reported the same way.
    #[::tracing::instrument(skip(db, hasher, password))]
    pub async fn create_user(
        db: &DatabaseConnection,
        hasher: &PasswordHasher,
        username: &str,
        password: &str,
    ) -> Result<Self, CreateUserError> {
        let validation = Self::validate_new(username, password);

        if !validation.is_empty() {
            return Err(CreateUserError::Invalid(validation));
        }

        let password = hasher.hash(password).map_err(CreateUserError::Hash)?;
        let model = Self {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password,
            is_staff: false,
            created_at: now(),
        };

        match model.store(db).await {
            Ok(user) => {
                ::tracing::info!(user_id = %user.id, "User created");

                Ok(user)
            }
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                let mut validation = Validation::new();
                validation.add("username", "Username already registered.");

                Err(CreateUserError::Invalid(validation))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn validate_new(username: &str, password: &str) -> Validation {
        let mut validation = Validation::new();

        if username.is_empty() {
            validation.add("username", "Username is required.");
        }

        if password.is_empty() {
            validation.add("password", "Password is required.");
        }

        if !validation.is_empty() {
            return validation;
        }

        if let Err(message) = Validator::validate_username(username) {
            validation.add("username", message);
        }

        if let Err(messages) = Validator::validate_password(password, username) {
            for message in messages {
                validation.add("password", message);
            }
        }

        validation
    }
}
