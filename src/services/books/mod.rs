pub mod comment;
pub mod index;
pub mod show;

pub use comment::comment;
pub use index::index;
pub use show::show;
