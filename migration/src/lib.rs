pub use sea_orm_migration::prelude::*;

mod m20220720_000001_create_users;
mod m20220720_000002_create_books;
mod m20220720_124700_create_comments;
mod m20220801_000001_create_sessions;
mod m20220801_000002_catalogue_seeder;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20220720_000001_create_users::Migration),
            Box::new(m20220720_000002_create_books::Migration),
            Box::new(m20220720_124700_create_comments::Migration),
            Box::new(m20220801_000001_create_sessions::Migration),
            Box::new(m20220801_000002_catalogue_seeder::Migration),
        ]
    }
}
