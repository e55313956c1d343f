//! Common types and traits for EEG device drivers

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use eeg_types::{BoardKind, BoardSelection, SensorError as EegSensorError};

use crate::mock_eeg::MockDriver;

/// Highest channel index the synthetic board accepts.
const MAX_CHANNEL_INDEX: u8 = 31;

/// Configuration for the synthetic ADC
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdcConfig {
    /// Target sample rate in Hz
    pub sample_rate: u32,
    /// Reference voltage for ADC conversion
    pub vref: f32,
    /// Gain setting for all channels
    pub gain: f32,
    /// Active channel indices (0-indexed)
    pub channels: Vec<u8>,
    /// Number of samples generated per batch
    pub batch_size: usize,
}

impl Default for AdcConfig {
    fn default() -> Self {
        Self {
            sample_rate: BoardKind::Synthetic.sample_rate(),
            vref: 4.5,
            gain: 24.0,
            channels: (0..8).collect(),
            batch_size: 16,
        }
    }
}

impl AdcConfig {
    pub fn validate(&self) -> Result<(), DriverError> {
        if self.sample_rate == 0 {
            return Err(DriverError::ConfigurationError(
                "Sample rate must be greater than 0".to_string(),
            ));
        }
        if self.channels.is_empty() {
            return Err(DriverError::ConfigurationError(
                "At least one channel must be configured".to_string(),
            ));
        }

        let mut unique_channels = HashSet::new();
        for &channel in &self.channels {
            if !unique_channels.insert(channel) {
                return Err(DriverError::ConfigurationError(format!(
                    "Duplicate channel detected: {}",
                    channel
                )));
            }
            if channel > MAX_CHANNEL_INDEX {
                return Err(DriverError::ConfigurationError(format!(
                    "Invalid channel index: {}. Supported channels are 0-{}",
                    channel, MAX_CHANNEL_INDEX
                )));
            }
        }

        if self.batch_size == 0 {
            return Err(DriverError::ConfigurationError(
                "Batch size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Column names for the configured channels (`ch1`, `ch2`, ...).
    pub fn channel_names(&self) -> Vec<String> {
        self.channels.iter().map(|c| format!("ch{}", *c as u32 + 1)).collect()
    }
}

/// Status of a device driver
#[derive(Debug, Clone, PartialEq)]
pub enum DriverStatus {
    /// Driver has never been started
    NotInitialized,
    /// Driver is actively acquiring data
    Running,
    /// Acquisition finished and the recording was saved
    Stopped,
    /// Driver encountered an error
    Error(String),
}

/// Errors that can occur in device drivers
#[derive(Error, Debug, Clone)]
pub enum DriverError {
    /// A sensor-specific error.
    #[error("Sensor error: {0}")]
    SensorError(#[from] EegSensorError),
    /// No driver exists for the requested board
    #[error("Hardware not found: {0}")]
    HardwareNotFound(String),
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Acquisition already running")]
    AlreadyRunning,
    #[error("Acquisition not running")]
    NotRunning,
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),
    /// Writing the recording failed
    #[error("Recording error: {0}")]
    RecordingError(String),
    /// Generic error
    #[error("Error: {0}")]
    Other(String),
}

impl From<std::io::Error> for DriverError {
    fn from(err: std::io::Error) -> Self {
        DriverError::IoError(err.to_string())
    }
}

impl From<csv::Error> for DriverError {
    fn from(err: csv::Error) -> Self {
        DriverError::RecordingError(err.to_string())
    }
}

/// What a finished acquisition wrote to disk
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSummary {
    pub path: PathBuf,
    pub samples: usize,
    pub markers: usize,
}

/// Trait that all EEG devices must implement
///
/// A device records from `start` until `stop`, accepting stimulus markers in
/// between, and writes everything it collected to the path given to `start`.
pub trait EegDevice: Send {
    /// Board code, e.g. `synthetic` or `cyton_wifi`
    fn board_code(&self) -> &str;

    fn sample_rate(&self) -> u32;

    fn channel_names(&self) -> &[String];

    /// Begin acquisition. Fails with `AlreadyRunning` if called twice.
    fn start(&mut self, save_path: &Path) -> Result<(), DriverError>;

    /// Timestamp an event marker. Fails with `NotRunning` outside `start`/`stop`.
    fn push_marker(&mut self, code: u32) -> Result<(), DriverError>;

    /// Stop acquisition and save the recording.
    fn stop(&mut self) -> Result<RecordingSummary, DriverError>;

    fn status(&self) -> DriverStatus;
}

/// Build the device for a board selection.
///
/// Returns `Ok(None)` for the `none` board: the experiment then runs without
/// recording anything.
pub fn create_device(
    selection: &BoardSelection,
    config: &AdcConfig,
) -> Result<Option<Box<dyn EegDevice>>, DriverError> {
    match selection.kind {
        BoardKind::None => {
            info!("No EEG device selected; recording disabled");
            Ok(None)
        }
        BoardKind::Synthetic => {
            let driver = MockDriver::new(config.clone(), selection.code())?;
            Ok(Some(Box::new(driver)))
        }
        _ => Err(DriverError::HardwareNotFound(format!(
            "no acquisition driver for board '{}' is available in this build",
            selection.code()
        ))),
    }
}
