//! Shared types for the EEG session launcher
//!
//! This crate contains the vocabulary used throughout the workspace:
//! the board catalogue, connection methods, experiment kinds and the
//! sensor error type that device drivers surface.

pub mod board;
pub mod data;
pub mod experiment;

// Re-export commonly used types
pub use board::*;
pub use data::*;
pub use experiment::*;
