// src/config.rs
// Run parameters and their accepted ranges

use crate::error::{Error, Result};
use crate::sampler::DEFAULT_CACHE_CAPACITY;
use crate::waveform::ToneShape;
use std::ops::RangeInclusive;

pub const FREQUENCY_RANGE: RangeInclusive<f64> = 80.0..=8000.0;
pub const SAMPLE_RATE_RANGE: RangeInclusive<u32> = 8000..=96000;
pub const WPM_RANGE: RangeInclusive<u32> = 5..=30;

pub const DEFAULT_CHUNK_SIZE: usize = 16;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub shape: ToneShape,
    /// Tone frequency in Hz.
    pub frequency: f64,
    /// Output sample rate in Hz, used for both playback and WAV files.
    pub sample_rate: u32,
    pub words_per_minute: u32,
    /// Symbols per cached chunk.
    pub chunk_size: usize,
    pub cache_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shape: ToneShape::Sine,
            frequency: 800.0,
            sample_rate: 44100,
            words_per_minute: 20,
            chunk_size: DEFAULT_CHUNK_SIZE,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if !FREQUENCY_RANGE.contains(&self.frequency) {
            return Err(out_of_range("frequency", self.frequency, &FREQUENCY_RANGE));
        }
        if !SAMPLE_RATE_RANGE.contains(&self.sample_rate) {
            return Err(out_of_range("sample rate", self.sample_rate, &SAMPLE_RATE_RANGE));
        }
        if !WPM_RANGE.contains(&self.words_per_minute) {
            return Err(out_of_range("words per minute", self.words_per_minute, &WPM_RANGE));
        }
        if self.chunk_size == 0 {
            return Err(Error::parameter("chunk size", "must be at least 1"));
        }
        Ok(())
    }

    /// Length of one dit in seconds (PARIS timing).
    pub fn dit_duration(&self) -> f64 {
        1.2 / self.words_per_minute as f64
    }
}

fn out_of_range<T: std::fmt::Display>(name: &'static str, value: T, range: &RangeInclusive<T>) -> Error {
    Error::parameter(
        name,
        format!("{} is outside {}..={}", value, range.start(), range.end()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert!((settings.dit_duration() - 0.06).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_values() {
        let cases = [
            Settings { frequency: 79.0, ..Default::default() },
            Settings { frequency: 8000.5, ..Default::default() },
            Settings { sample_rate: 7999, ..Default::default() },
            Settings { sample_rate: 192000, ..Default::default() },
            Settings { words_per_minute: 4, ..Default::default() },
            Settings { words_per_minute: 31, ..Default::default() },
            Settings { chunk_size: 0, ..Default::default() },
        ];
        for settings in cases {
            let err = settings.validate().unwrap_err();
            assert!(err.is_configuration(), "{settings:?}");
        }
    }

    #[test]
    fn test_range_bounds_inclusive() {
        let low = Settings {
            frequency: 80.0,
            sample_rate: 8000,
            words_per_minute: 5,
            chunk_size: 1,
            ..Default::default()
        };
        let high = Settings {
            frequency: 8000.0,
            sample_rate: 96000,
            words_per_minute: 30,
            ..Default::default()
        };
        assert!(low.validate().is_ok());
        assert!(high.validate().is_ok());
        assert!((high.dit_duration() - 0.04).abs() < 1e-12);
    }
}
