pub mod cache_test;
pub mod config_test;
