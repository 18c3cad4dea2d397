use sea_orm::prelude::*;
use serde::Serialize;

use crate::entities::comments::{ActiveModel, Entity, Model};
use crate::entities::{books, users};
use crate::prelude::now;

/// A comment as listed under its book.
///
/// `author` is `None` once the account that wrote it has been deleted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommentWithAuthor {
    pub id: Uuid,
    pub comment: String,
    pub author: Option<String>,
    pub created_at: DateTime,
}

impl From<(Model, Option<users::Model>)> for CommentWithAuthor {
    fn from((comment, author): (Model, Option<users::Model>)) -> Self {
        Self {
            id: comment.id,
            comment: comment.comment,
            author: author.map(|user| user.username),
            created_at: comment.created_at,
        }
    }
}

impl Model {
    /// Stores `text` verbatim. Escaping happens when it is rendered.
    ///
    /// Ids are time-ordered v7 UUIDs, so comments sharing a timestamp still
    /// list in the order they were written.
    pub async fn create<T: Into<String>>(
        db: &DatabaseConnection,
        book: &books::Model,
        user: Option<&users::Model>,
        text: T,
    ) -> Result<Self, DbErr> {
        let model = Self {
            id: Uuid::now_v7(),
            book_id: book.id,
            user_id: user.map(|user| user.id),
            comment: text.into(),
            created_at: now(),
        };

        model.store(db).await
    }

    pub async fn store(&self, db: &DatabaseConnection) -> Result<Self, DbErr> {
        ActiveModel::from(self.clone()).insert(db).await
    }

    pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        Entity::find().count(db).await
    }
}
