pub mod authenticated;
pub mod sessions;

pub use authenticated::{Auth, CurrentUser, Staff};
pub use sessions::{SessionUser, Sessions};
