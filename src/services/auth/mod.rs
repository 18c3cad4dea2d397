pub mod helpers;
pub mod login;
pub mod logout;
pub mod register;

pub use helpers::{authenticate, check_registration, get_user};
pub use login::login;
pub use logout::logout;
pub use register::register;
