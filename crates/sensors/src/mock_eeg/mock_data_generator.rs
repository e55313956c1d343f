use std::f32::consts::PI;

use log::{debug, trace};
use rand::Rng;
use rand_distr::StandardNormal;

use eeg_types::SensorError;

use crate::types::{AdcConfig, DriverError};

/// Full scale of a 24-bit ADC with sign bit (2^23)
const ADC_FULL_SCALE: f64 = 8_388_608.0;

/// Scale for converting the unit-less band mix into 24-bit counts.
/// Roughly 10 uV per unit at gain 24.
const AMPLITUDE: f32 = 450.0;

/// Standard deviation of the broadband noise, before scaling
const NOISE_STD: f32 = 0.1;

/// Center frequencies of the delta, theta, alpha, beta and gamma bands in Hz
const BAND_FREQS: [f32; 5] = [2.5, 6.0, 10.0, 20.0, 40.0];

/// Band weights per scalp region, repeated across channels.
/// Format: [delta, theta, alpha, beta, gamma]
const REGION_WEIGHTS: [[f32; 5]; 4] = [
    [3.0, 1.5, 0.8, 0.4, 0.1], // frontal: more delta/theta
    [2.0, 1.2, 1.5, 0.6, 0.1], // central: mix
    [1.5, 1.0, 2.5, 0.7, 0.1], // parietal: stronger alpha
    [1.2, 0.8, 3.0, 0.5, 0.1], // occipital: strongest alpha
];

/// Helper function to get current timestamp in microseconds
pub fn current_timestamp_micros() -> Result<u64, DriverError> {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .map_err(|e| SensorError::HardwareFault(format!("Clock is before the Unix epoch: {}", e)).into())
}

/// Convert a raw 24-bit sample to microvolts.
///
/// The full-scale voltage is `vref / gain`, as on the ADS1299.
pub fn convert_sample_to_microvolts(sample_value: i32, vref: f32, gain: f32) -> f32 {
    let gain = if gain > 0.0 { gain } else { 1.0 };
    let v_fs = vref as f64 / gain as f64;
    ((sample_value as f64 * v_fs / ADC_FULL_SCALE) * 1_000_000.0) as f32
}

/// A generator for EEG-like data with multiple frequency bands and line noise.
#[derive(Debug, Clone)]
pub struct EegGenerator {
    sample_rate: u32,
    vref: f32,
    gain: f32,
    // Phase accumulators per channel, one per band
    band_phase: Vec<[f32; 5]>,
    channel_weights: Vec<[f32; 5]>,
    line_noise_phase: Vec<f32>,
    line_noise_amplitude: Vec<f32>,
    line_noise_hz: f32,
}

impl EegGenerator {
    pub fn new(config: &AdcConfig) -> Self {
        let mut rng = rand::thread_rng();
        let num_channels = config.channels.len();

        debug!(
            "Initializing EEG generator with {} Hz sample rate, {} channels",
            config.sample_rate, num_channels
        );

        let band_phase = (0..num_channels)
            .map(|_| {
                let mut phases = [0.0; 5];
                for phase in phases.iter_mut() {
                    *phase = rng.gen::<f32>() * 2.0 * PI;
                }
                phases
            })
            .collect();
        let channel_weights = (0..num_channels)
            .map(|i| REGION_WEIGHTS[(i / 2) % REGION_WEIGHTS.len()])
            .collect();
        let line_noise_phase = (0..num_channels).map(|_| rng.gen::<f32>() * 2.0 * PI).collect();
        // Different channels pick up different amounts of line noise
        let line_noise_amplitude = (0..num_channels).map(|_| rng.gen_range(0.2..0.7)).collect();

        Self {
            sample_rate: config.sample_rate,
            vref: config.vref,
            gain: config.gain,
            band_phase,
            channel_weights,
            line_noise_phase,
            line_noise_amplitude,
            line_noise_hz: 60.0,
        }
    }

    pub fn num_channels(&self) -> usize {
        self.band_phase.len()
    }

    /// Advance every channel by one sample period and return the raw ADC codes.
    pub fn next_raw(&mut self) -> Vec<i32> {
        let mut rng = rand::thread_rng();
        let rate = self.sample_rate as f32;
        let two_pi = 2.0 * PI;

        (0..self.num_channels())
            .map(|ch| {
                let mut signal = 0.0;
                for (band, freq) in BAND_FREQS.iter().enumerate() {
                    let phase = &mut self.band_phase[ch][band];
                    *phase = (*phase + two_pi * freq / rate) % two_pi;
                    signal += phase.sin() * self.channel_weights[ch][band];
                }

                let line = &mut self.line_noise_phase[ch];
                *line = (*line + two_pi * self.line_noise_hz / rate) % two_pi;
                signal += line.sin() * self.line_noise_amplitude[ch];
                let noise: f32 = rng.sample(StandardNormal);
                signal += noise * NOISE_STD;

                (signal * AMPLITUDE) as i32
            })
            .collect()
    }

    /// Next sample converted to microvolts.
    pub fn next_microvolts(&mut self) -> Vec<f32> {
        let (vref, gain) = (self.vref, self.gain);
        let raw = self.next_raw();
        trace!("Generated raw sample {:?}", raw);
        raw.into_iter()
            .map(|value| convert_sample_to_microvolts(value, vref, gain))
            .collect()
    }
}
