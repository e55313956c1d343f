//! Visual P300 oddball
//!
//! Targets and non-targets are interleaved; the P300 is a positive
//! deflection around 300 ms after a target.

use rand::{Rng, RngCore};

use eeg_types::ExperimentKind;

use crate::experiment::Experiment;
use crate::schedule::{Condition, TrialTiming};

pub const NON_TARGET: Condition = Condition { marker: 1, label: "non_target" };
pub const TARGET: Condition = Condition { marker: 2, label: "target" };

const CONDITIONS: [Condition; 2] = [NON_TARGET, TARGET];

pub const DEFAULT_TIMING: TrialTiming = TrialTiming::new(0.4, 0.3, 0.2);
pub const DEFAULT_TARGET_PROBABILITY: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct P300 {
    timing: TrialTiming,
    seed: Option<u64>,
    target_probability: f64,
}

impl Default for P300 {
    fn default() -> Self {
        Self {
            timing: DEFAULT_TIMING,
            seed: None,
            target_probability: DEFAULT_TARGET_PROBABILITY,
        }
    }
}

impl P300 {
    pub fn new(timing: TrialTiming, seed: Option<u64>) -> Self {
        Self {
            timing,
            seed,
            ..Default::default()
        }
    }

    /// Probability of a target trial, clamped to `[0, 1]`.
    pub fn with_target_probability(mut self, probability: f64) -> Self {
        self.target_probability = if probability.is_finite() {
            probability.clamp(0.0, 1.0)
        } else {
            DEFAULT_TARGET_PROBABILITY
        };
        self
    }

    pub fn target_probability(&self) -> f64 {
        self.target_probability
    }
}

impl Experiment for P300 {
    fn kind(&self) -> ExperimentKind {
        ExperimentKind::VisualP300
    }

    fn description(&self) -> &'static str {
        "Oddball paradigm with rare targets among non-targets"
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

    fn next_condition(&self, rng: &mut dyn RngCore) -> Condition {
        if rng.gen_bool(self.target_probability) {
            TARGET
        } else {
            NON_TARGET
        }
    }
}
