use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use tracing::info;

use eeg_sensor::create_device;
use eeg_types::{BoardSelection, ExperimentKind};
use experiments::{experiment_for, PresentationSummary};

use crate::config::LauncherConfig;
use crate::error::Result;
use crate::save_path::generate_save_path;

/// Everything the operator chose for one session
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRequest {
    pub board: BoardSelection,
    pub experiment: ExperimentKind,
    pub duration_secs: u64,
    pub subject: String,
}

#[derive(Debug)]
pub struct SessionOutcome {
    pub save_path: PathBuf,
    pub presentation: PresentationSummary,
}

/// Pick the output file, open the board and run the chosen experiment.
///
/// The save path is written to `out` before acquisition starts.
pub fn run_session<W: Write>(
    request: &SessionRequest,
    config: &LauncherConfig,
    out: &mut W,
) -> Result<SessionOutcome> {
    let save_path = generate_save_path(
        &config.data_directory,
        &request.board.code(),
        request.experiment.name(),
        &request.subject,
    )?;
    writeln!(out, "{}", save_path.display())?;

    let mut device = create_device(&request.board, &config.synthetic_board)?;
    let experiment = experiment_for(request.experiment, &config.experiment);

    info!(
        board = %request.board,
        experiment = experiment.name(),
        subject = %request.subject,
        duration_secs = request.duration_secs,
        "Running session"
    );

    let presentation = experiment.present(
        Duration::from_secs(request.duration_secs),
        device.as_deref_mut(),
        &save_path,
    )?;

    Ok(SessionOutcome {
        save_path,
        presentation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use eeg_sensor::DriverError;
    use eeg_types::{BoardKind, ConnectionMethod};
    use tempfile::tempdir;

    use crate::error::LauncherError;

    #[test]
    fn test_hardware_board_is_reported_before_recording() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config = LauncherConfig {
            data_directory: temp_dir.path().to_path_buf(),
            ..Default::default()
        };
        let request = SessionRequest {
            board: BoardSelection::with_connection(BoardKind::Cyton, ConnectionMethod::WifiShield),
            experiment: ExperimentKind::VisualN170,
            duration_secs: 1,
            subject: "alice".to_string(),
        };

        let mut out = Vec::new();
        let result = run_session(&request, &config, &mut out);

        assert!(matches!(
            result,
            Err(LauncherError::Driver(DriverError::HardwareNotFound(_)))
        ));
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.trim_end().ends_with("alice_TRIAL_0_cyton_wifi.csv"));
        assert!(!temp_dir
            .path()
            .join("visual_n170")
            .join("alice_TRIAL_0_cyton_wifi.csv")
            .exists());
    }

    #[test]
    fn test_invalid_subject_stops_session() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let config = LauncherConfig {
            data_directory: temp_dir.path().to_path_buf(),
            ..Default::default()
        };
        let request = SessionRequest {
            board: BoardSelection::new(BoardKind::Synthetic),
            experiment: ExperimentKind::VisualP300,
            duration_secs: 1,
            subject: "../escape".to_string(),
        };

        let mut out = Vec::new();
        let result = run_session(&request, &config, &mut out);
        assert!(matches!(result, Err(LauncherError::InvalidSubject(_))));
        assert!(out.is_empty());
    }
}
