use sea_orm::QueryOrder;
use sea_orm::prelude::*;

use crate::entities::books::{Column, Entity, Model};
use crate::entities::{comments, users};
use crate::models::comment::CommentWithAuthor;

impl Model {
    pub async fn all(db: &DatabaseConnection) -> Result<Vec<Self>, DbErr> {
        Entity::find().order_by_asc(Column::Title).all(db).await
    }

    pub async fn find_by_slug<T: AsRef<str>>(
        db: &DatabaseConnection,
        slug: T,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::Slug.eq(slug.as_ref()))
            .one(db)
            .await
            .inspect_err(|e| {
                ::tracing::error!(error = %e, "Failed to find book by slug");
            })
    }

    /// Comments in the order they were written, with their authors' names.
    pub async fn comments(&self, db: &DatabaseConnection) -> Result<Vec<CommentWithAuthor>, DbErr> {
        let rows = comments::Entity::find()
            .filter(comments::Column::BookId.eq(self.id))
            .find_also_related(users::Entity)
            .order_by_asc(comments::Column::CreatedAt)
            .order_by_asc(comments::Column::Id)
            .all(db)
            .await?;

        Ok(rows.into_iter().map(CommentWithAuthor::from).collect())
    }

    pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        Entity::find().count(db).await
    }
}
