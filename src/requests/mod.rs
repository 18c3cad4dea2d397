pub mod auth;
pub mod comment;

pub use auth::{LoginRequest, RegisterRequest};
pub use comment::CommentRequest;
