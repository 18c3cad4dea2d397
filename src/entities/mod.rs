pub mod books;
pub mod comments;
pub mod sessions;
pub mod users;
