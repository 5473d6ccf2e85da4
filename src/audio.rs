// src/audio.rs
// Rendered sample buffer and its output views

use crate::error::Result;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::io::{Seek, Write};
use std::path::Path;

/// Samples written per block when saving; progress is logged per block.
const SAVING_BUFFER_SIZE: usize = 8192;

#[derive(Debug, Clone, PartialEq)]
pub struct AudioData {
    samples: Vec<f64>,
    sample_rate: u32,
}

impl AudioData {
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Peak-normalized to [-1, 1]. A silent buffer stays all zeros.
    pub fn as_float32(&self) -> Vec<f32> {
        let peak = self.samples.iter().fold(0.0f64, |acc, s| acc.max(s.abs()));
        if peak == 0.0 {
            return vec![0.0; self.samples.len()];
        }
        self.samples.iter().map(|s| (s / peak) as f32).collect()
    }

    /// 16-bit PCM: samples are clamped to [-1, 1], scaled by 32767 and truncated toward zero.
    pub fn as_int16(&self) -> Vec<i16> {
        self.samples
            .iter()
            .map(|s| (s.clamp(-1.0, 1.0) * i16::MAX as f64) as i16)
            .collect()
    }

    /// Writes mono 16-bit PCM at the buffer's sample rate.
    pub fn write_wav<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        log::info!("Writing audio data to {:?}...", path);
        let writer = WavWriter::create(path, self.wav_spec())?;
        self.write_samples(writer)?;
        log::info!("Saving completed successfully");
        Ok(())
    }

    pub fn write_wav_to<W: Write + Seek>(&self, writer: W) -> Result<()> {
        let writer = WavWriter::new(writer, self.wav_spec())?;
        self.write_samples(writer)
    }

    fn wav_spec(&self) -> WavSpec {
        WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        }
    }

    fn write_samples<W: Write + Seek>(&self, mut writer: WavWriter<W>) -> Result<()> {
        let pcm = self.as_int16();
        let blocks = pcm.len().div_ceil(SAVING_BUFFER_SIZE);

        for (i, block) in pcm.chunks(SAVING_BUFFER_SIZE).enumerate() {
            let mut block_writer = writer.get_i16_writer(block.len() as u32);
            for &sample in block {
                block_writer.write_sample(sample);
            }
            block_writer.flush()?;
            log::debug!("Saved block {}/{}", i + 1, blocks);
        }

        writer.finalize()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::WavReader;
    use std::io::Cursor;

    #[test]
    fn test_float32_normalizes_to_peak() {
        let audio = AudioData::new(vec![0.0, 0.25, -0.5, 0.1], 8000);
        assert_eq!(audio.as_float32(), vec![0.0, 0.5, -1.0, 0.2]);
    }

    #[test]
    fn test_float32_of_silence_is_zero() {
        let audio = AudioData::new(vec![0.0; 16], 8000);
        let view = audio.as_float32();
        assert_eq!(view.len(), 16);
        assert!(view.iter().all(|s| *s == 0.0));
        assert!(AudioData::new(Vec::new(), 8000).as_float32().is_empty());
    }

    #[test]
    fn test_int16_scaling_and_clamping() {
        let audio = AudioData::new(vec![0.0, 1.0, -1.0, 0.5, 1.5, -3.0, 0.99999], 8000);
        assert_eq!(
            audio.as_int16(),
            vec![0, 32767, -32767, 16383, 32767, -32767, 32766]
        );
    }

    #[test]
    fn test_duration() {
        let audio = AudioData::new(vec![0.0; 4410], 44100);
        assert!((audio.duration() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_wav_round_trip_header_and_samples() {
        let samples: Vec<f64> = (0..20_000).map(|i| ((i % 100) as f64 / 50.0) - 1.0).collect();
        let audio = AudioData::new(samples, 22050);

        let mut buffer = Cursor::new(Vec::new());
        audio.write_wav_to(&mut buffer).unwrap();
        buffer.set_position(0);

        let mut reader = WavReader::new(buffer).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 22050);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_format, SampleFormat::Int);

        let read: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(read, audio.as_int16());
    }
}
