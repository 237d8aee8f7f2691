//! Decoded audio handed over by the caller.

use serde::{Deserialize, Serialize};

/// Mono `f32` samples at a known sample rate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AudioBuffer {
    pub samples: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl AudioBuffer {
    /// Wrap already decoded samples.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when there are no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds; 0 for a zero sample rate.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Convert a duration in milliseconds to a whole number of samples.
///
/// Truncates toward zero; negative or NaN durations give 0.
pub fn ms_to_samples(ms: f64, sample_rate: u32) -> usize {
    (ms / 1000.0 * sample_rate as f64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_ms_to_samples() {
        assert_eq!(ms_to_samples(10.0, 44100), 441);
        assert_eq!(ms_to_samples(1.0, 48000), 48);
        // 0.05 s at 22050 Hz = 1102.5, truncated
        assert_eq!(ms_to_samples(50.0, 22050), 1102);
        assert_eq!(ms_to_samples(-5.0, 48000), 0);
    }

    #[test]
    fn duration_follows_sample_rate() {
        let audio = AudioBuffer::new(vec![0.0; 24000], 48000);
        assert!((audio.duration_secs() - 0.5).abs() < 1e-12);
        assert_eq!(AudioBuffer::default().duration_secs(), 0.0);
    }
}
