//! Visual N170: faces versus houses
//!
//! The N170 is a negative deflection over occipito-temporal sites roughly
//! 170 ms after a face appears, larger for faces than for other objects.

use eeg_types::ExperimentKind;

use crate::experiment::Experiment;
use crate::schedule::{Condition, TrialTiming};

pub const HOUSE: Condition = Condition { marker: 1, label: "house" };
pub const FACE: Condition = Condition { marker: 2, label: "face" };

const CONDITIONS: [Condition; 2] = [HOUSE, FACE];

pub const DEFAULT_TIMING: TrialTiming = TrialTiming::new(0.4, 0.3, 0.2);

#[derive(Debug, Clone)]
pub struct N170 {
    timing: TrialTiming,
    seed: Option<u64>,
}

impl Default for N170 {
    fn default() -> Self {
        Self {
            timing: DEFAULT_TIMING,
            seed: None,
        }
    }
}

impl N170 {
    pub fn new(timing: TrialTiming, seed: Option<u64>) -> Self {
        Self { timing, seed }
    }
}

impl Experiment for N170 {
    fn kind(&self) -> ExperimentKind {
        ExperimentKind::VisualN170
    }

    fn description(&self) -> &'static str {
        "Faces and houses shown in random order"
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
}
