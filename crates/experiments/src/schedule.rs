//! Trial timing and stimulus scheduling

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{ExperimentError, Result};

/// Longest interval any timing field may ask for.
pub const MAX_INTERVAL_SECS: f64 = 3600.0;

/// Shortest stimulus; roughly one frame at 60-100 Hz refresh.
pub const MIN_SOA_SECS: f64 = 0.01;

/// Per-trial timing, in seconds.
///
/// Each trial shows a stimulus for `soa_secs`, then waits `iti_secs` plus a
/// uniform random jitter in `[0, jitter_secs)` before the next onset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialTiming {
    /// Inter-trial interval
    pub iti_secs: f64,
    /// Stimulus onset asynchrony (time on screen)
    pub soa_secs: f64,
    pub jitter_secs: f64,
}

impl TrialTiming {
    pub const fn new(iti_secs: f64, soa_secs: f64, jitter_secs: f64) -> Self {
        Self {
            iti_secs,
            soa_secs,
            jitter_secs,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("iti_secs", self.iti_secs),
            ("soa_secs", self.soa_secs),
            ("jitter_secs", self.jitter_secs),
        ];
        for (name, value) in fields {
            if !value.is_finite() || !(0.0..=MAX_INTERVAL_SECS).contains(&value) {
                return Err(ExperimentError::InvalidTiming(format!(
                    "{} must be between 0 and {} seconds, got {}",
                    name, MAX_INTERVAL_SECS, value
                )));
            }
        }
        if self.soa_secs < MIN_SOA_SECS {
            return Err(ExperimentError::InvalidTiming(format!(
                "soa_secs must be at least {} seconds, got {}",
                MIN_SOA_SECS, self.soa_secs
            )));
        }
        Ok(())
    }

    fn gap(&self, rng: &mut dyn RngCore) -> Duration {
        let jitter = if self.jitter_secs > 0.0 {
            rng.gen::<f64>() * self.jitter_secs
        } else {
            0.0
        };
        Duration::from_secs_f64(self.iti_secs + jitter)
    }
}

/// A class of stimulus and the marker code recorded at its onset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
    pub marker: u32,
    pub label: &'static str,
}

/// One scheduled trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stimulus {
    /// Offset from the start of the presentation
    pub onset: Duration,
    pub condition: Condition,
}

/// RNG for a presentation: reproducible when a seed is given.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Lay out trials back to back until the next one would run past `duration`.
///
/// The first onset is one gap after the start. A trial is kept only if its
/// stimulus finishes within `duration`.
pub fn build_schedule<F>(
    timing: &TrialTiming,
    duration: Duration,
    rng: &mut dyn RngCore,
    mut pick: F,
) -> Vec<Stimulus>
where
    F: FnMut(&mut dyn RngCore) -> Condition,
{
    let soa = Duration::from_secs_f64(timing.soa_secs);
    let mut stimuli = Vec::new();
    let mut onset = timing.gap(rng);

    while onset + soa <= duration {
        let condition = pick(&mut *rng);
        stimuli.push(Stimulus { onset, condition });
        onset += soa + timing.gap(rng);
    }
    stimuli
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Condition = Condition { marker: 1, label: "a" };
    const B: Condition = Condition { marker: 2, label: "b" };

    fn coin(rng: &mut dyn RngCore) -> Condition {
        if rng.gen_bool(0.5) {
            A
        } else {
            B
        }
    }

    #[test]
    fn test_fixed_timing_schedule() {
        let timing = TrialTiming::new(0.5, 1.0, 0.0);
        let mut rng = make_rng(Some(1));
        let stimuli = build_schedule(&timing, Duration::from_secs(5), &mut rng, |_| A);

        let onsets: Vec<f64> = stimuli.iter().map(|s| s.onset.as_secs_f64()).collect();
        assert_eq!(onsets, vec![0.5, 2.0, 3.5]);
    }

    #[test]
    fn test_schedule_fits_duration_and_increases() {
        let timing = TrialTiming::new(0.4, 0.3, 0.2);
        let duration = Duration::from_secs(30);
        let mut rng = make_rng(Some(7));
        let stimuli = build_schedule(&timing, duration, &mut rng, coin);

        assert!(!stimuli.is_empty());
        let soa = Duration::from_secs_f64(timing.soa_secs);
        for stim in &stimuli {
            assert!(stim.onset + soa <= duration);
        }
        for pair in stimuli.windows(2) {
            let gap = pair[1].onset - pair[0].onset;
            assert!(gap >= Duration::from_secs_f64(0.699));
            assert!(gap < Duration::from_secs_f64(0.9 + 1e-9));
        }
    }

    #[test]
    fn test_seeded_schedules_repeat() {
        let timing = TrialTiming::new(0.4, 0.3, 0.2);
        let duration = Duration::from_secs(10);
        let first = build_schedule(&timing, duration, &mut make_rng(Some(42)), coin);
        let second = build_schedule(&timing, duration, &mut make_rng(Some(42)), coin);
        assert_eq!(first, second);
    }

    #[test]
    fn test_too_short_duration_yields_no_trials() {
        let timing = TrialTiming::new(0.5, 3.0, 0.0);
        let stimuli = build_schedule(&timing, Duration::from_secs(3), &mut make_rng(None), |_| A);
        assert!(stimuli.is_empty());
    }

    #[test]
    fn test_timing_validation() {
        assert!(TrialTiming::new(0.4, 0.3, 0.2).validate().is_ok());
        assert!(TrialTiming::new(0.4, 0.0, 0.2).validate().is_err());
        assert!(TrialTiming::new(-0.1, 0.3, 0.2).validate().is_err());
        assert!(TrialTiming::new(0.4, f64::NAN, 0.2).validate().is_err());
    }

    #[test]
    fn test_timing_bounds() {
        assert!(TrialTiming::new(0.4, 1e300, 0.0).validate().is_err());
        assert!(TrialTiming::new(f64::INFINITY, 0.3, 0.0).validate().is_err());
        assert!(TrialTiming::new(0.4, 0.3, MAX_INTERVAL_SECS + 1.0).validate().is_err());
        assert!(TrialTiming::new(0.4, 0.001, 0.0).validate().is_err());
        assert!(TrialTiming::new(MAX_INTERVAL_SECS, MIN_SOA_SECS, 0.0).validate().is_ok());
    }
}
