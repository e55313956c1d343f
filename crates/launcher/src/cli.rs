use std::path::PathBuf;

use clap::Parser;

use eeg_types::{BoardSelection, ExperimentKind};

use crate::config::LauncherConfig;
use crate::prompt::SessionPreset;

/// Launch an EEG data-collection session.
///
/// Anything not given on the command line is asked for interactively.
#[derive(Parser, Debug, Default)]
#[command(name = "eeg_launcher", author, version, about, long_about = None)]
pub struct Args {
    /// JSON configuration file (defaults to ./launcher.json when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Board code, e.g. `synthetic`, `muse` or `cyton_wifi`
    #[arg(long)]
    pub board: Option<BoardSelection>,

    /// Experiment: `visual_n170`, `visual_p300` or `visual_ssvep`
    #[arg(long)]
    pub experiment: Option<ExperimentKind>,

    /// Recording duration in seconds
    #[arg(long)]
    pub duration: Option<u64>,

    /// Subject name or ID
    #[arg(long)]
    pub subject: Option<String>,

    /// Root directory for recordings
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Seed for the stimulus sequence
    #[arg(long)]
    pub seed: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Answers supplied up front, which skip their prompts.
    pub fn preset(&self) -> SessionPreset {
        SessionPreset {
            board: self.board,
            experiment: self.experiment,
            duration_secs: self.duration,
            subject: self.subject.clone(),
        }
    }

    /// Command-line flags take precedence over the configuration file.
    pub fn apply_overrides(&self, config: &mut LauncherConfig) {
        if let Some(data_dir) = &self.data_dir {
            config.data_directory = data_dir.clone();
        }
        if let Some(seed) = self.seed {
            config.experiment.seed = Some(seed);
        }
    }
}
