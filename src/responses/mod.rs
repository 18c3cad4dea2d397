pub mod page;
pub mod redirect;
pub mod statistics;

pub use page::Page;
pub use redirect::Redirect;
pub use statistics::Statistics;
