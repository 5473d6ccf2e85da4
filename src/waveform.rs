// src/waveform.rs
// Periodic waveform generators used to render dits and dahs

use crate::error::{Error, Result};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Produces fixed-duration sample buffers at a fixed sample rate.
pub trait WaveformGenerator {
    fn sample_rate(&self) -> u32;

    fn frequency(&self) -> f64;

    /// `round(sample_rate * duration)` samples, sample `n` evaluated at `t = n / sample_rate`.
    fn sound(&self, duration: f64) -> Vec<f64>;

    /// A silent generator sharing this generator's sample rate.
    fn silence(&self) -> SilenceGenerator {
        SilenceGenerator::new(self.sample_rate())
    }
}

/// Number of samples covering `duration` seconds.
pub fn sample_count(sample_rate: u32, duration: f64) -> usize {
    if duration.is_finite() && duration > 0.0 {
        (sample_rate as f64 * duration).round() as usize
    } else {
        0
    }
}

// --- Shapes ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ToneShape {
    Sine,
    #[value(alias = "sawtooth")]
    Saw,
    Triangle,
    Square,
}

impl ToneShape {
    pub fn name(self) -> &'static str {
        match self {
            ToneShape::Sine => "sine",
            ToneShape::Saw => "saw",
            ToneShape::Triangle => "triangle",
            ToneShape::Square => "square",
        }
    }

    /// Evaluates one sample of the shape at time `t` for frequency `f`.
    pub fn eval(self, t: f64, f: f64) -> f64 {
        match self {
            ToneShape::Sine => sine(t, f),
            ToneShape::Saw => sawtooth(t, f),
            ToneShape::Triangle => triangle(t, f),
            ToneShape::Square => square(t, f),
        }
    }
}

impl fmt::Display for ToneShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToneShape {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sine" => Ok(ToneShape::Sine),
            "saw" | "sawtooth" => Ok(ToneShape::Saw),
            "triangle" => Ok(ToneShape::Triangle),
            "square" => Ok(ToneShape::Square),
            _ => Err(Error::InvalidToneShape(s.to_string())),
        }
    }
}

pub fn sine(t: f64, f: f64) -> f64 {
    (2.0 * PI * f * t).sin()
}

/// Sign of the sine; exactly zero where the sine is zero.
pub fn square(t: f64, f: f64) -> f64 {
    let s = sine(t, f);
    if s > 0.0 {
        1.0
    } else if s < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Rising ramp from -1 towards 1 over each period.
pub fn sawtooth(t: f64, f: f64) -> f64 {
    2.0 * t.rem_euclid(1.0 / f) * f - 1.0
}

/// Distance of `t·f` from its nearest integer, which ranges over [0, 0.5].
/// This is a unipolar triangle (DC offset of 0.25), not a ±1 one.
pub fn triangle(t: f64, f: f64) -> f64 {
    let x = t * f;
    (x - (0.5 + x).floor()).abs()
}

// --- Generators ---
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneGenerator {
    shape: ToneShape,
    frequency: f64,
    sample_rate: u32,
}

impl ToneGenerator {
    pub fn new(shape: ToneShape, frequency: f64, sample_rate: u32) -> Result<Self> {
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(Error::parameter(
                "frequency",
                format!("must be a positive number of Hz, got {}", frequency),
            ));
        }
        if sample_rate == 0 {
            return Err(Error::parameter("sample rate", "must be positive"));
        }

        log::debug!(
            "ToneGenerator initialized: shape={}, frequency={}Hz, sample_rate={}Hz",
            shape,
            frequency,
            sample_rate
        );
        Ok(Self {
            shape,
            frequency,
            sample_rate,
        })
    }

    pub fn shape(&self) -> ToneShape {
        self.shape
    }
}

impl WaveformGenerator for ToneGenerator {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn frequency(&self) -> f64 {
        self.frequency
    }

    fn sound(&self, duration: f64) -> Vec<f64> {
        let rate = self.sample_rate as f64;
        (0..sample_count(self.sample_rate, duration))
            .map(|n| self.shape.eval(n as f64 / rate, self.frequency))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SilenceGenerator {
    sample_rate: u32,
}

impl SilenceGenerator {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }
}

impl WaveformGenerator for SilenceGenerator {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn frequency(&self) -> f64 {
        0.0
    }

    fn sound(&self, duration: f64) -> Vec<f64> {
        vec![0.0; sample_count(self.sample_rate, duration)]
    }
}
