use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHasher, SaltString},
};
use rand::rngs::OsRng;
use sea_orm_migration::prelude::*;
use uuid::Uuid;

use crate::m20220720_000001_create_users::User;
use crate::m20220720_000002_create_books::Book;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Staff account is only seeded when this variable carries a password.
pub const ADMIN_PASSWORD_ENV: &str = "BOOKSTORE_ADMIN_PASSWORD";

const ADMIN_USERNAME: &str = "admin";

// (title, slug, author, description)
const BOOKS: [(&str, &str, &str, &str); 5] = [
    (
        "Frankenstein",
        "frankenstein",
        "Mary Shelley",
        "A young scientist creates a sapient creature in an unorthodox experiment.",
    ),
    (
        "Moby-Dick",
        "moby-dick",
        "Herman Melville",
        "The obsessive quest of Captain Ahab for revenge on the white whale.",
    ),
    (
        "Pride and Prejudice",
        "pride-and-prejudice",
        "Jane Austen",
        "Elizabeth Bennet navigates manners, morality and marriage in Regency England.",
    ),
    (
        "The Time Machine",
        "the-time-machine",
        "H. G. Wells",
        "A Victorian inventor travels to the year 802,701 and beyond.",
    ),
    (
        "Twenty Thousand Leagues Under the Seas",
        "twenty-thousand-leagues-under-the-seas",
        "Jules Verne",
        "Professor Aronnax is held aboard the Nautilus by the enigmatic Captain Nemo.",
    ),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let now = chrono::Utc::now().naive_utc();
        let mut query = Query::insert()
            .into_table(Book::Table)
            .columns(vec![
                Book::Id,
                Book::Title,
                Book::Slug,
                Book::Author,
                Book::Description,
                Book::CreatedAt,
            ])
            .to_owned();

        for (title, slug, author, description) in BOOKS {
            query = query
                .values_panic(vec![
                    Uuid::new_v4().into(),
                    title.into(),
                    slug.into(),
                    author.into(),
                    description.into(),
                    now.into(),
                ])
                .to_owned();
        }

        manager.exec_stmt(query).await?;

        let password = match std::env::var(ADMIN_PASSWORD_ENV) {
            Ok(password) if !password.is_empty() => password,
            _ => return Ok(()),
        };

        let params = Params::new(65536, 3, 4, Some(32))
            .map_err(|e| DbErr::Custom(format!("Invalid Argon2 parameters: {e}")))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| DbErr::Custom(format!("Failed to hash admin password: {e}")))?
            .to_string();

        manager
            .exec_stmt(
                Query::insert()
                    .into_table(User::Table)
                    .columns(vec![
                        User::Id,
                        User::Username,
                        User::Password,
                        User::IsStaff,
                        User::CreatedAt,
                    ])
                    .values_panic(vec![
                        Uuid::new_v4().into(),
                        ADMIN_USERNAME.into(),
                        password_hash.into(),
                        true.into(),
                        now.into(),
                    ])
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(User::Table)
                    .and_where(Expr::col(User::Username).eq(ADMIN_USERNAME))
                    .to_owned(),
            )
            .await?;

        for (_, slug, _, _) in BOOKS {
            manager
                .exec_stmt(
                    Query::delete()
                        .from_table(Book::Table)
                        .and_where(Expr::col(Book::Slug).eq(slug))
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }
}
