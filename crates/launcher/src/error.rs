use eeg_sensor::DriverError;
use experiments::ExperimentError;
use thiserror::Error;

/// Everything that can end a launcher run
#[derive(Debug, Error)]
pub enum LauncherError {
    #[error("Expected an integer for '{prompt}', got '{input}'")]
    NotAnInteger { prompt: String, input: String },
    #[error("Invalid {menu} selection {index}: choose a value from 0 to {max}")]
    InvalidSelection {
        menu: &'static str,
        index: i64,
        max: usize,
    },
    #[error("Duration must be between 1 and {} seconds, got {0}", crate::prompt::MAX_DURATION_SECS)]
    InvalidDuration(i64),
    #[error("Input ended before '{0}' was answered")]
    UnexpectedEof(String),
    #[error("Invalid subject id '{0}': it must be non-empty and contain no path separators")]
    InvalidSubject(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Driver(#[from] DriverError),
    #[error(transparent)]
    Experiment(#[from] ExperimentError),
}

pub type Result<T> = std::result::Result<T, LauncherError>;
