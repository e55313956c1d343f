// Re-export modules for library use
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod prompt;
pub mod save_path;
pub mod session;

pub use error::{LauncherError, Result};
