use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use eeg_sensor::AdcConfig;
use experiments::ExperimentOptions;

use crate::error::{LauncherError, Result};

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "./launcher.json";

/// Directory recordings are written under, one subdirectory per experiment
pub const DEFAULT_DATA_DIRECTORY: &str = "data";

/// Configuration for the launcher
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Root of the `<experiment>/<subject>_TRIAL_<n>_<board>.csv` tree
    pub data_directory: PathBuf,
    /// Signal parameters for the synthetic board
    pub synthetic_board: AdcConfig,
    /// Seed and timing overrides for the experiments
    pub experiment: ExperimentOptions,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            data_directory: PathBuf::from(DEFAULT_DATA_DIRECTORY),
            synthetic_board: AdcConfig::default(),
            experiment: ExperimentOptions::default(),
        }
    }
}

impl LauncherConfig {
    pub fn validate(&self) -> Result<()> {
        self.synthetic_board
            .validate()
            .map_err(|e| LauncherError::Config(format!("synthetic_board: {}", e)))?;
        if let Some(timing) = &self.experiment.timing {
            timing
                .validate()
                .map_err(|e| LauncherError::Config(format!("experiment.timing: {}", e)))?;
        }
        Ok(())
    }
}

/// Load launcher configuration.
///
/// An explicitly named file must exist. Without one, `./launcher.json` is used
/// when present and the defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<LauncherConfig> {
    match path {
        Some(path) => read_config(path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                read_config(default_path)
            } else {
                debug!("No configuration file at {}, using defaults", DEFAULT_CONFIG_PATH);
                Ok(LauncherConfig::default())
            }
        }
    }
}

fn read_config(path: &Path) -> Result<LauncherConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        LauncherError::Config(format!(
            "could not read configuration file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let config: LauncherConfig = serde_json::from_str(&contents).map_err(|e| {
        LauncherError::Config(format!(
            "could not parse configuration file '{}': {}",
            path.display(),
            e
        ))
    })?;
    config.validate()?;

    info!("Loaded configuration from {}", path.display());
    Ok(config)
}
