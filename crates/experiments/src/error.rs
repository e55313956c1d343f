use std::time::Duration;

use eeg_sensor::DriverError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExperimentError {
    #[error("Invalid trial timing: {0}")]
    InvalidTiming(String),
    #[error("Presentation of {0:?} exceeds the {:?} limit", crate::experiment::MAX_DURATION)]
    DurationTooLong(Duration),
    #[error("EEG device error: {0}")]
    Device(#[from] DriverError),
}

pub type Result<T> = std::result::Result<T, ExperimentError>;
