use sea_orm_migration::prelude::*;

use crate::m20220720_000001_create_users::User;
use crate::m20220720_000002_create_books::Book;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .if_not_exists()
                    .table(Comment::Table)
                    .col(ColumnDef::new(Comment::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Comment::BookId).uuid().not_null())
                    .col(ColumnDef::new(Comment::UserId).uuid().null())
                    .col(ColumnDef::new(Comment::Comment).text().not_null())
                    .col(ColumnDef::new(Comment::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_book_id")
                            .from(Comment::Table, Comment::BookId)
                            .to(Book::Table, Book::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_user_id")
                            .from(Comment::Table, Comment::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .take(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Comment::Table)
                    .col(Comment::BookId)
                    .col(Comment::CreatedAt)
                    .name("idx_comments_book_id_created_at")
                    .take(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(Comment::Table).take())
            .await
    }
}

#[derive(DeriveIden)]
enum Comment {
    #[sea_orm(iden = "comments")]
    Table,
    Id,
    BookId,
    UserId,
    Comment,
    CreatedAt,
}
