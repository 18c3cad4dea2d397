use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .if_not_exists()
                    .table(Book::Table)
                    .col(ColumnDef::new(Book::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Book::Title).string().not_null())
                    .col(ColumnDef::new(Book::Slug).string().not_null().unique_key())
                    .col(ColumnDef::new(Book::Author).string().not_null())
                    .col(ColumnDef::new(Book::Description).text().not_null())
                    .col(ColumnDef::new(Book::CreatedAt).timestamp().not_null())
                    .take(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Book::Table)
                    .col(Book::Title)
                    .name("idx_books_title")
                    .take(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(Book::Table).take())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Book {
    #[sea_orm(iden = "books")]
    Table,
    Id,
    Title,
    Slug,
    Author,
    Description,
    CreatedAt,
}
