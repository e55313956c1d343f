//! Trial-numbered output paths
//!
//! Recordings live at `<data_dir>/<experiment>/<subject>_TRIAL_<n>_<board>.csv`.
//! The trial number is the lowest one whose file does not exist yet, so a new
//! session never overwrites an earlier one.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{LauncherError, Result};

/// File name for one trial of a subject on a board.
pub fn trial_file_name(subject: &str, trial: u64, board_code: &str) -> String {
    format!("{}_TRIAL_{}_{}.csv", subject, trial, board_code)
}

/// A subject id ends up inside a file name and must not escape its directory.
///
/// Returns the id with surrounding whitespace removed.
pub fn validate_subject(subject: &str) -> Result<&str> {
    let trimmed = subject.trim();
    let invalid = trimmed.is_empty()
        || trimmed.contains(&['/', '\\', '\0'][..])
        || trimmed == "."
        || trimmed == "..";
    if invalid {
        return Err(LauncherError::InvalidSubject(subject.to_string()));
    }
    Ok(trimmed)
}

/// Build a path for the next trial, creating the experiment directory if needed.
pub fn generate_save_path(
    data_dir: &Path,
    board_code: &str,
    experiment: &str,
    subject: &str,
) -> Result<PathBuf> {
    let subject = validate_subject(subject)?;

    let experiment_dir = data_dir.join(experiment);
    fs::create_dir_all(&experiment_dir)?;

    let mut trial = 0;
    loop {
        let candidate = experiment_dir.join(trial_file_name(subject, trial, board_code));
        if !candidate.exists() {
            debug!("Trial {} is free for subject '{}'", trial, subject);
            return Ok(candidate);
        }
        trial += 1;
    }
}
