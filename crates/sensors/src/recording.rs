//! In-memory recording buffer and its CSV serialization
//!
//! Samples and markers are collected separately while a device runs. When the
//! recording is saved each marker is attached to the first sample taken at or
//! after it, giving the `stim` column of the CSV file (0 means no event).

use std::path::Path;

use log::{debug, info, warn};

use eeg_types::{EegSample, Marker};

use crate::types::{DriverError, RecordingSummary};

/// Column holding the stimulus marker code.
pub const STIM_COLUMN: &str = "stim";

#[derive(Debug, Clone, Default)]
pub struct Recording {
    channel_names: Vec<String>,
    samples: Vec<EegSample>,
    markers: Vec<Marker>,
}

impl Recording {
    pub fn new(channel_names: Vec<String>) -> Self {
        Self {
            channel_names,
            samples: Vec::new(),
            markers: Vec::new(),
        }
    }

    pub fn extend_samples(&mut self, batch: Vec<EegSample>) {
        self.samples.extend(batch);
    }

    pub fn push_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    /// One marker code per sample. Samples are assumed to be in timestamp order.
    pub fn stim_channel(&self) -> Vec<u32> {
        let mut stim = vec![0; self.samples.len()];
        if self.samples.is_empty() {
            if !self.markers.is_empty() {
                warn!("Dropping {} markers: no samples were recorded", self.markers.len());
            }
            return stim;
        }

        let last = self.samples.len() - 1;
        for marker in &self.markers {
            let idx = self
                .samples
                .partition_point(|s| s.timestamp < marker.timestamp)
                .min(last);
            if stim[idx] != 0 {
                warn!(
                    "Marker {} at {} overwrites marker {} on sample {}",
                    marker.code, marker.timestamp, stim[idx], idx
                );
            }
            stim[idx] = marker.code;
        }
        stim
    }

    /// Write the recording as CSV: `timestamp,<channels...>,stim`.
    pub fn write_csv(&self, path: &Path) -> Result<RecordingSummary, DriverError> {
        let mut writer = csv::Writer::from_path(path)?;

        let mut header = Vec::with_capacity(self.channel_names.len() + 2);
        header.push("timestamp".to_string());
        header.extend(self.channel_names.iter().cloned());
        header.push(STIM_COLUMN.to_string());
        writer.write_record(&header)?;

        let stim = self.stim_channel();
        for (sample, code) in self.samples.iter().zip(stim.iter()) {
            let mut record = Vec::with_capacity(header.len());
            record.push(sample.timestamp.to_string());
            for channel_idx in 0..self.channel_names.len() {
                let value = sample.channels.get(channel_idx).cloned().unwrap_or(0.0);
                record.push(value.to_string());
            }
            record.push(code.to_string());
            writer.write_record(&record)?;
        }
        writer.flush()?;

        debug!("Wrote {} rows to {}", self.samples.len(), path.display());
        info!(
            "Saved recording to {} ({} samples, {} markers)",
            path.display(),
            self.samples.len(),
            self.markers.len()
        );

        Ok(RecordingSummary {
            path: path.to_path_buf(),
            samples: self.samples.len(),
            markers: self.markers.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample(timestamp: u64) -> EegSample {
        EegSample {
            timestamp,
            channels: vec![1.5, -2.0],
        }
    }

    fn recording_with(timestamps: &[u64]) -> Recording {
        let mut recording = Recording::new(vec!["ch1".to_string(), "ch2".to_string()]);
        recording.extend_samples(timestamps.iter().map(|&t| sample(t)).collect());
        recording
    }

    #[test]
    fn test_marker_attaches_to_next_sample() {
        let mut recording = recording_with(&[100, 200, 300, 400]);
        recording.push_marker(Marker { timestamp: 150, code: 2 });
        recording.push_marker(Marker { timestamp: 300, code: 1 });

        assert_eq!(recording.stim_channel(), vec![0, 2, 1, 0]);
    }

    #[test]
    fn test_marker_before_first_and_after_last_sample() {
        let mut recording = recording_with(&[100, 200]);
        recording.push_marker(Marker { timestamp: 10, code: 3 });
        recording.push_marker(Marker { timestamp: 999, code: 4 });

        assert_eq!(recording.stim_channel(), vec![3, 4]);
    }

    #[test]
    fn test_markers_without_samples_are_dropped() {
        let mut recording = Recording::new(vec!["ch1".to_string()]);
        recording.push_marker(Marker { timestamp: 10, code: 1 });
        assert!(recording.stim_channel().is_empty());
    }

    #[test]
    fn test_write_csv_layout() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("subject_TRIAL_0_synthetic.csv");

        let mut recording = recording_with(&[100, 200, 300]);
        recording.push_marker(Marker { timestamp: 200, code: 2 });
        let summary = recording.write_csv(&path).expect("write failed");

        assert_eq!(summary.samples, 3);
        assert_eq!(summary.markers, 1);
        assert_eq!(summary.path, path);

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "timestamp,ch1,ch2,stim");
        assert_eq!(lines[1], "100,1.5,-2,0");
        assert_eq!(lines[2], "200,1.5,-2,2");
        assert_eq!(lines.len(), 4);
    }
}
