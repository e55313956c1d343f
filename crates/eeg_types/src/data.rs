use serde::{Deserialize, Serialize};

/// Represents errors that can occur within a sensor driver.
///
/// These errors are intended to be propagated to the operator to provide
/// feedback on the state of the hardware.
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum SensorError {
    /// A hardware-related fault.
    #[error("Sensor hardware fault: {0}")]
    HardwareFault(String),
}

/// Raised when a board code or experiment name is not in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Unknown board code '{0}'")]
    UnknownBoard(String),
    #[error("Unknown experiment '{0}'")]
    UnknownExperiment(String),
}

/// A single multi-channel sample as read from a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EegSample {
    /// Microseconds since the Unix epoch
    pub timestamp: u64,
    /// One value per channel, in microvolts
    pub channels: Vec<f32>,
}

/// An event marker pushed by an experiment at stimulus onset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// Microseconds since the Unix epoch
    pub timestamp: u64,
    pub code: u32,
}
