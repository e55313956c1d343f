use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, error, info, warn};

use eeg_types::{EegSample, Marker};

use super::mock_data_generator::{current_timestamp_micros, EegGenerator};
use crate::recording::Recording;
use crate::types::{AdcConfig, DriverError, DriverStatus, EegDevice, RecordingSummary};

/// Upper bound on how long the acquisition thread sleeps between batches.
const MAX_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// A synthetic board that does not access any hardware.
///
/// Acquisition runs on a background thread that paces itself against the
/// wall clock and ships sample batches back over a channel. Batches are
/// drained into the recording whenever a marker is pushed and on `stop`.
pub struct MockDriver {
    config: AdcConfig,
    board_code: String,
    channel_names: Vec<String>,
    status: DriverStatus,
    session: Option<ActiveSession>,
}

/// State that only exists between `start` and `stop`.
struct ActiveSession {
    save_path: PathBuf,
    stop_flag: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    rx: flume::Receiver<Vec<EegSample>>,
    recording: Recording,
}

impl ActiveSession {
    fn drain(&mut self) {
        for batch in self.rx.try_iter() {
            self.recording.extend_samples(batch);
        }
    }
}

impl MockDriver {
    pub fn new(config: AdcConfig, board_code: impl Into<String>) -> Result<Self, DriverError> {
        config.validate()?;

        let channel_names = config.channel_names();
        let board_code = board_code.into();
        info!("MockDriver created for '{}' with config: {:?}", board_code, config);

        Ok(Self {
            config,
            board_code,
            channel_names,
            status: DriverStatus::NotInitialized,
            session: None,
        })
    }

    fn stop_thread(session: &mut ActiveSession) -> Result<(), DriverError> {
        session.stop_flag.store(true, Ordering::Relaxed);
        if let Some(handle) = session.handle.take() {
            handle
                .join()
                .map_err(|_| DriverError::Other("Acquisition thread panicked".to_string()))?;
        }
        Ok(())
    }
}

impl EegDevice for MockDriver {
    fn board_code(&self) -> &str {
        &self.board_code
    }

    fn sample_rate(&self) -> u32 {
        self.config.sample_rate
    }

    fn channel_names(&self) -> &[String] {
        &self.channel_names
    }

    fn start(&mut self, save_path: &Path) -> Result<(), DriverError> {
        if self.session.is_some() {
            return Err(DriverError::AlreadyRunning);
        }

        let base_timestamp = current_timestamp_micros()?;
        let stop_flag = Arc::new(AtomicBool::new(false));
        let (tx, rx) = flume::unbounded();

        let config = self.config.clone();
        let thread_stop = stop_flag.clone();
        let handle = thread::Builder::new()
            .name("mock-eeg-acquisition".to_string())
            .spawn(move || run_acquisition(config, base_timestamp, tx, thread_stop))?;

        self.session = Some(ActiveSession {
            save_path: save_path.to_path_buf(),
            stop_flag,
            handle: Some(handle),
            rx,
            recording: Recording::new(self.channel_names.clone()),
        });
        self.status = DriverStatus::Running;

        info!(
            "MockDriver '{}' acquiring at {} Hz, saving to {}",
            self.board_code,
            self.config.sample_rate,
            save_path.display()
        );
        Ok(())
    }

    fn push_marker(&mut self, code: u32) -> Result<(), DriverError> {
        let session = self.session.as_mut().ok_or(DriverError::NotRunning)?;
        let timestamp = current_timestamp_micros()?;
        session.drain();
        session.recording.push_marker(Marker { timestamp, code });
        debug!("Marker {} at {}", code, timestamp);
        Ok(())
    }

    fn stop(&mut self) -> Result<RecordingSummary, DriverError> {
        let mut session = self.session.take().ok_or(DriverError::NotRunning)?;

        if let Err(e) = Self::stop_thread(&mut session) {
            error!("Failed to stop acquisition: {}", e);
            self.status = DriverStatus::Error(e.to_string());
            return Err(e);
        }
        session.drain();

        match session.recording.write_csv(&session.save_path) {
            Ok(summary) => {
                self.status = DriverStatus::Stopped;
                Ok(summary)
            }
            Err(e) => {
                self.status = DriverStatus::Error(e.to_string());
                Err(e)
            }
        }
    }

    fn status(&self) -> DriverStatus {
        self.status.clone()
    }
}

impl Drop for MockDriver {
    fn drop(&mut self) {
        if let Some(mut session) = self.session.take() {
            warn!("MockDriver dropped without calling stop() first; recording discarded.");
            let _ = Self::stop_thread(&mut session);
        }
    }
}

/// Body of the acquisition thread.
///
/// Sample `n` is stamped `base_timestamp + n / sample_rate`. The thread
/// generates every sample whose stamp has passed, so the final batch after
/// the stop flag covers the data up to the moment `stop` was requested.
fn run_acquisition(
    config: AdcConfig,
    base_timestamp: u64,
    tx: flume::Sender<Vec<EegSample>>,
    stop_flag: Arc<AtomicBool>,
) {
    let mut generator = EegGenerator::new(&config);
    let started = Instant::now();
    let sample_rate = config.sample_rate as u64;
    let batch_interval = Duration::from_secs_f64(config.batch_size as f64 / config.sample_rate as f64)
        .min(MAX_POLL_INTERVAL);
    let mut sample_count: u64 = 0;

    debug!(
        "Starting acquisition with batch size: {}, sample rate: {} Hz",
        config.batch_size, config.sample_rate
    );

    loop {
        let stopping = stop_flag.load(Ordering::Relaxed);
        let elapsed_us = started.elapsed().as_micros() as u64;
        let due = elapsed_us * sample_rate / 1_000_000 + 1;

        while sample_count < due {
            let batch_end = due.min(sample_count + config.batch_size as u64);
            let batch: Vec<EegSample> = (sample_count..batch_end)
                .map(|n| EegSample {
                    timestamp: base_timestamp + n * 1_000_000 / sample_rate,
                    channels: generator.next_microvolts(),
                })
                .collect();
            sample_count = batch_end;

            if tx.send(batch).is_err() {
                debug!("Sample receiver dropped, ending acquisition");
                return;
            }
        }

        if stopping {
            break;
        }
        thread::sleep(batch_interval);
    }

    debug!("Acquisition finished after {} samples", sample_count);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn small_config() -> AdcConfig {
        AdcConfig {
            sample_rate: 250,
            channels: vec![0, 1],
            batch_size: 5,
            ..Default::default()
        }
    }

    #[test]
    fn test_mock_driver_lifecycle() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("s1_TRIAL_0_synthetic.csv");

        let mut driver = MockDriver::new(small_config(), "synthetic").unwrap();
        assert_eq!(driver.status(), DriverStatus::NotInitialized);
        assert_eq!(driver.channel_names(), &["ch1".to_string(), "ch2".to_string()]);

        driver.start(&path).unwrap();
        assert_eq!(driver.status(), DriverStatus::Running);

        thread::sleep(Duration::from_millis(100));
        driver.push_marker(2).unwrap();
        thread::sleep(Duration::from_millis(50));

        let summary = driver.stop().unwrap();
        assert_eq!(driver.status(), DriverStatus::Stopped);
        assert_eq!(summary.markers, 1);
        // 150 ms at 250 Hz is about 37 samples
        assert!(summary.samples >= 20, "only {} samples recorded", summary.samples);

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("timestamp,ch1,ch2,stim"));
        let stims: Vec<&str> = lines.filter_map(|l| l.rsplit(',').next()).collect();
        assert_eq!(stims.len(), summary.samples);
        assert_eq!(stims.iter().filter(|s| **s == "2").count(), 1);
    }

    #[test]
    fn test_timestamps_follow_sample_rate() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("timing.csv");

        let mut driver = MockDriver::new(small_config(), "synthetic").unwrap();
        driver.start(&path).unwrap();
        thread::sleep(Duration::from_millis(60));
        driver.stop().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let stamps: Vec<u64> = contents
            .lines()
            .skip(1)
            .map(|l| l.split(',').next().unwrap().parse().unwrap())
            .collect();
        assert!(stamps.len() > 2);
        for pair in stamps.windows(2) {
            assert_eq!(pair[1] - pair[0], 4_000);
        }
    }

    #[test]
    fn test_marker_and_stop_require_running() {
        let mut driver = MockDriver::new(small_config(), "synthetic").unwrap();
        assert!(matches!(driver.push_marker(1), Err(DriverError::NotRunning)));
        assert!(matches!(driver.stop(), Err(DriverError::NotRunning)));
    }

    #[test]
    fn test_double_start_is_rejected() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("double.csv");

        let mut driver = MockDriver::new(small_config(), "synthetic").unwrap();
        driver.start(&path).unwrap();
        assert!(matches!(driver.start(&path), Err(DriverError::AlreadyRunning)));
        driver.stop().unwrap();
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = AdcConfig {
            channels: vec![],
            ..Default::default()
        };
        assert!(matches!(
            MockDriver::new(config, "synthetic"),
            Err(DriverError::ConfigurationError(_))
        ));
    }
}
