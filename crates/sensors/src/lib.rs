pub mod types;
pub mod recording;
pub mod mock_eeg;

// Re-export the main types that users need
pub use types::{create_device, AdcConfig, DriverError, DriverStatus, EegDevice, RecordingSummary};
pub use recording::Recording;
pub use mock_eeg::MockDriver;
