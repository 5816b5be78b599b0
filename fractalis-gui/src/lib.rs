pub mod config;
pub mod dir;
pub mod gui;
pub mod logger;
pub mod screen;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
