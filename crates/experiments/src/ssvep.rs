//! Visual SSVEP: flickering checkerboards
//!
//! Each trial flickers at one of two frequencies for several seconds; the
//! visual cortex follows the flicker rate.

use eeg_types::ExperimentKind;

use crate::experiment::Experiment;
use crate::schedule::{Condition, TrialTiming};

pub const FLICKER_30HZ: Condition = Condition { marker: 1, label: "30hz" };
pub const FLICKER_20HZ: Condition = Condition { marker: 2, label: "20hz" };

const CONDITIONS: [Condition; 2] = [FLICKER_30HZ, FLICKER_20HZ];

pub const DEFAULT_TIMING: TrialTiming = TrialTiming::new(0.5, 3.0, 0.2);

/// Refresh rate the flicker frequencies are derived from.
pub const REFRESH_RATE_HZ: f64 = 60.0;

#[derive(Debug, Clone)]
pub struct Ssvep {
    timing: TrialTiming,
    seed: Option<u64>,
}

impl Default for Ssvep {
    fn default() -> Self {
        Self {
            timing: DEFAULT_TIMING,
            seed: None,
        }
    }
}

impl Ssvep {
    pub fn new(timing: TrialTiming, seed: Option<u64>) -> Self {
        Self { timing, seed }
    }

    /// Flicker frequency in Hz for a condition, if it is one of ours.
    pub fn frequency(condition: &Condition) -> Option<f64> {
        match condition.marker {
            1 => Some(30.0),
            2 => Some(20.0),
            _ => None,
        }
    }

    /// Whole display frames per flicker cycle at `REFRESH_RATE_HZ`.
    pub fn frames_per_cycle(condition: &Condition) -> Option<u32> {
        Self::frequency(condition).map(|hz| (REFRESH_RATE_HZ / hz).round() as u32)
    }
}

impl Experiment for Ssvep {
    fn kind(&self) -> ExperimentKind {
        ExperimentKind::VisualSsvep
    }

    fn description(&self) -> &'static str {
        "Checkerboard flickering at 30 Hz or 20 Hz"
    }

    fn conditions(&self) -> &[Condition] {
        &CONDITIONS
    }

    fn timing(&self) -> TrialTiming {
        self.timing
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn stimulus_detail(&self, condition: &Condition) -> Option<String> {
        let hz = Self::frequency(condition)?;
        let frames = Self::frames_per_cycle(condition)?;
        Some(format!("{} Hz flicker, {} frames per cycle", hz, frames))
    }
}
