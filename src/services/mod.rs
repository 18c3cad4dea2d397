pub mod auth;
pub mod books;
pub mod statistics;
