//! The experiment trait and the presentation loop shared by every paradigm

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use rand::{Rng, RngCore};
use tracing::{debug, info, warn};

use eeg_sensor::{EegDevice, RecordingSummary};
use eeg_types::ExperimentKind;

use crate::error::{ExperimentError, Result};
use crate::schedule::{build_schedule, make_rng, Condition, Stimulus, TrialTiming};

/// Longest presentation accepted by [`run_presentation`].
pub const MAX_DURATION: Duration = Duration::from_secs(4 * 60 * 60);

/// What a finished presentation produced
#[derive(Debug, Clone, PartialEq)]
pub struct PresentationSummary {
    pub experiment: ExperimentKind,
    /// Stimuli shown, in order
    pub stimuli: Vec<Stimulus>,
    /// Present when an EEG device was recording
    pub recording: Option<RecordingSummary>,
}

impl PresentationSummary {
    /// Number of trials shown for a marker code.
    pub fn count(&self, marker: u32) -> usize {
        self.stimuli
            .iter()
            .filter(|s| s.condition.marker == marker)
            .count()
    }
}

/// Core trait that every experiment paradigm implements
pub trait Experiment: Send + Sync {
    fn kind(&self) -> ExperimentKind;

    /// Name used for logging and data directories
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// One-line summary logged when a presentation starts
    fn description(&self) -> &'static str;

    /// Stimulus classes and their marker codes
    fn conditions(&self) -> &[Condition];

    fn timing(&self) -> TrialTiming;

    /// Seed for the trial sequence; `None` draws from entropy
    fn seed(&self) -> Option<u64> {
        None
    }

    /// Pick the condition of the next trial. Uniform over `conditions()` by default.
    fn next_condition(&self, rng: &mut dyn RngCore) -> Condition {
        let conditions = self.conditions();
        conditions[rng.gen_range(0..conditions.len())]
    }

    /// Extra detail logged with each stimulus of `condition`.
    fn stimulus_detail(&self, _condition: &Condition) -> Option<String> {
        None
    }

    /// Full trial sequence for a presentation of `duration`.
    fn schedule(&self, duration: Duration, rng: &mut dyn RngCore) -> Vec<Stimulus> {
        build_schedule(&self.timing(), duration, rng, |rng| self.next_condition(rng))
    }

    /// Run the experiment for `duration`, recording into `save_path` when a
    /// device is given.
    fn present(
        &self,
        duration: Duration,
        eeg: Option<&mut (dyn EegDevice + '_)>,
        save_path: &Path,
    ) -> Result<PresentationSummary> {
        run_presentation(self, duration, eeg, save_path)
    }
}

/// Start the device, walk the schedule in real time pushing a marker at each
/// onset, hold until `duration` has elapsed, then stop and save.
///
/// The device is stopped even when pushing a marker fails, so whatever was
/// acquired still reaches disk before the error is returned.
pub fn run_presentation<E: Experiment + ?Sized>(
    experiment: &E,
    duration: Duration,
    mut eeg: Option<&mut (dyn EegDevice + '_)>,
    save_path: &Path,
) -> Result<PresentationSummary> {
    experiment.timing().validate()?;
    if duration > MAX_DURATION {
        return Err(ExperimentError::DurationTooLong(duration));
    }

    let mut rng = make_rng(experiment.seed());
    let stimuli = experiment.schedule(duration, &mut rng);
    info!(
        experiment = experiment.name(),
        trials = stimuli.len(),
        duration_secs = duration.as_secs_f64(),
        "Starting presentation: {}",
        experiment.description()
    );

    match eeg.as_deref_mut() {
        Some(device) => {
            let channels = device.channel_names().join(",");
            info!(
                board = device.board_code(),
                sample_rate = device.sample_rate(),
                channels = %channels,
                "Recording EEG"
            );
            device.start(save_path)?
        }
        None => warn!("No EEG device attached; running presentation without recording"),
    }

    let started = Instant::now();
    let delivered = deliver(experiment, &stimuli, started, eeg.as_deref_mut());
    sleep_until(started, duration);

    let recording = match eeg {
        Some(device) => Some(device.stop()?),
        None => None,
    };
    delivered?;

    let summary = PresentationSummary {
        experiment: experiment.kind(),
        stimuli,
        recording,
    };
    for condition in experiment.conditions() {
        info!(
            experiment = experiment.name(),
            condition = condition.label,
            trials = summary.count(condition.marker),
            "Presentation finished"
        );
    }
    Ok(summary)
}

fn deliver<E: Experiment + ?Sized>(
    experiment: &E,
    stimuli: &[Stimulus],
    started: Instant,
    mut eeg: Option<&mut (dyn EegDevice + '_)>,
) -> Result<()> {
    for (trial, stimulus) in stimuli.iter().enumerate() {
        sleep_until(started, stimulus.onset);
        if let Some(device) = eeg.as_deref_mut() {
            device.push_marker(stimulus.condition.marker)?;
        }
        let detail = experiment.stimulus_detail(&stimulus.condition);
        debug!(
            trial,
            marker = stimulus.condition.marker,
            label = stimulus.condition.label,
            detail = detail.as_deref(),
            onset_secs = stimulus.onset.as_secs_f64(),
            "Stimulus"
        );
    }
    Ok(())
}

fn sleep_until(started: Instant, offset: Duration) {
    match started.checked_add(offset) {
        Some(deadline) => {
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            }
        }
        None => warn!("Offset {:?} is out of range; not waiting", offset),
    }
}
