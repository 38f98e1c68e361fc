pub mod config;
pub mod loader;
