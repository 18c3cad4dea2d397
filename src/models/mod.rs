//! Query and persistence helpers implemented directly on the entity models.

pub mod book;
pub mod comment;
pub mod session;
pub mod user;

pub use comment::CommentWithAuthor;
pub use user::CreateUserError;
