use std::fs;
use std::io::Cursor;

use eeg_launcher::config::LauncherConfig;
use eeg_launcher::prompt::{IntroPrompt, SessionPreset};
use eeg_launcher::session::run_session;
use eeg_launcher::LauncherError;
use eeg_sensor::AdcConfig;
use experiments::{ExperimentOptions, TrialTiming};
use tempfile::tempdir;

/// A config that records four synthetic channels and runs short trials.
fn fast_config(data_dir: &std::path::Path) -> LauncherConfig {
    LauncherConfig {
        data_directory: data_dir.to_path_buf(),
        synthetic_board: AdcConfig {
            sample_rate: 250,
            channels: vec![0, 1, 2, 3],
            ..Default::default()
        },
        experiment: ExperimentOptions {
            seed: Some(42),
            timing: Some(TrialTiming::new(0.1, 0.1, 0.05)),
            target_probability: None,
        },
    }
}

/// Drive the intro with a scripted answer sheet, then run the session.
fn scripted_session(
    script: &str,
    config: &LauncherConfig,
) -> Result<(String, eeg_launcher::session::SessionOutcome), LauncherError> {
    let mut prompt_output = Vec::new();
    let request = IntroPrompt::new(Cursor::new(script.as_bytes()), &mut prompt_output)
        .run(&SessionPreset::default())?;

    let mut session_output = Vec::new();
    let outcome = run_session(&request, config, &mut session_output)?;
    Ok((String::from_utf8(session_output).unwrap(), outcome))
}

#[test]
fn test_synthetic_session_writes_trials() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let config = fast_config(temp_dir.path());

    // Synthetic board, visual p300, one second, subject s01
    let (printed, first) = scripted_session("7\n1\n1\ns01\n", &config).unwrap();

    let expected = temp_dir.path().join("visual_p300").join("s01_TRIAL_0_synthetic.csv");
    assert_eq!(first.save_path, expected);
    assert_eq!(printed.trim(), expected.display().to_string());

    let recording = first
        .presentation
        .recording
        .as_ref()
        .expect("synthetic board should record");
    assert_eq!(recording.path, expected);
    assert_eq!(recording.markers, first.presentation.stimuli.len());
    assert!(!first.presentation.stimuli.is_empty());
    // Roughly one second at 250 Hz
    assert!(recording.samples >= 200, "only {} samples", recording.samples);

    let contents = fs::read_to_string(&expected).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("timestamp,ch1,ch2,ch3,ch4,stim"));
    assert_eq!(lines.count(), recording.samples);

    // A second run for the same subject never overwrites the first
    let (_, second) = scripted_session("7\n1\n1\ns01\n", &config).unwrap();
    assert_eq!(
        second.save_path,
        temp_dir.path().join("visual_p300").join("s01_TRIAL_1_synthetic.csv")
    );
    assert!(second.save_path.exists());
    assert_eq!(fs::read_to_string(&expected).unwrap(), contents);
}

#[test]
fn test_ssvep_session_uses_its_own_directory() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let config = fast_config(temp_dir.path());

    let (_, outcome) = scripted_session("7\n2\n1\ns02\n", &config).unwrap();

    assert_eq!(
        outcome.save_path,
        temp_dir.path().join("visual_ssvep").join("s02_TRIAL_0_synthetic.csv")
    );
    assert!(outcome.save_path.exists());
}

#[test]
fn test_no_board_runs_without_recording() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let config = fast_config(temp_dir.path());

    let (_, outcome) = scripted_session("0\n0\n1\ns03\n", &config).unwrap();

    assert!(outcome.presentation.recording.is_none());
    assert!(!outcome.presentation.stimuli.is_empty());
    assert!(!outcome.save_path.exists());
    assert_eq!(
        outcome.save_path,
        temp_dir.path().join("visual_n170").join("s03_TRIAL_0_none.csv")
    );
}

#[test]
fn test_bad_answer_ends_before_any_file_is_touched() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let config = fast_config(temp_dir.path());

    let result = scripted_session("7\nthree\n", &config);

    assert!(matches!(result, Err(LauncherError::NotAnInteger { .. })));
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}
