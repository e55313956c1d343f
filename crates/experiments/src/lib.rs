//! Visual stimulus-response experiments
//!
//! Each paradigm implements [`Experiment`]; [`experiment_for`] maps an
//! [`ExperimentKind`] chosen by the operator to its implementation.

pub mod error;
pub mod experiment;
pub mod n170;
pub mod p300;
pub mod schedule;
pub mod ssvep;

use serde::{Deserialize, Serialize};

use eeg_types::ExperimentKind;

pub use error::{ExperimentError, Result};
pub use experiment::{run_presentation, Experiment, PresentationSummary, MAX_DURATION};
pub use n170::N170;
pub use p300::P300;
pub use schedule::{Condition, Stimulus, TrialTiming};
pub use ssvep::Ssvep;

/// Knobs shared by all paradigms
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentOptions {
    /// Seed for reproducible trial sequences
    pub seed: Option<u64>,
    /// Overrides the paradigm's default timing
    pub timing: Option<TrialTiming>,
    /// P300 only
    pub target_probability: Option<f64>,
}

/// Build the experiment for `kind`.
pub fn experiment_for(kind: ExperimentKind, options: &ExperimentOptions) -> Box<dyn Experiment> {
    match kind {
        ExperimentKind::VisualN170 => Box::new(N170::new(
            options.timing.unwrap_or(n170::DEFAULT_TIMING),
            options.seed,
        )),
        ExperimentKind::VisualP300 => {
            let oddball = P300::new(options.timing.unwrap_or(p300::DEFAULT_TIMING), options.seed);
            match options.target_probability {
                Some(p) => Box::new(oddball.with_target_probability(p)),
                None => Box::new(oddball),
            }
        }
        ExperimentKind::VisualSsvep => Box::new(Ssvep::new(
            options.timing.unwrap_or(ssvep::DEFAULT_TIMING),
            options.seed,
        )),
    }
}
