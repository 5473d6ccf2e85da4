// src/playback.rs
// Live playback of rendered audio on the default output device

use crate::audio::AudioData;
use anyhow::{Result, anyhow, bail};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SizedSample, StreamConfig};
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const RESAMPLER_CHUNK_SIZE: usize = 1024;
const POLL_INTERVAL: Duration = Duration::from_millis(20);
/// Extra time allowed past the audio's own duration before giving up on the device.
const PLAYBACK_MARGIN: Duration = Duration::from_secs(2);

/// Shared between the stream callbacks and the waiting thread.
#[derive(Default)]
struct PlaybackState {
    position: AtomicUsize,
    finished: AtomicBool,
    failure: Mutex<Option<String>>,
}

/// Plays `audio` and blocks until the whole buffer has been handed to the device.
pub fn play(audio: &AudioData) -> Result<()> {
    if audio.is_empty() {
        log::info!("Nothing to play");
        return Ok(());
    }

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow!("No output device available"))?;
    let supported = device.default_output_config()?;
    log::debug!("Output device: {:?}", device.name());
    log::debug!("Output config: {:?}", supported);

    let device_rate = supported.sample_rate().0;
    let samples = resample(&audio.as_float32(), audio.sample_rate(), device_rate)?;
    let config: StreamConfig = supported.config();

    let samples = Arc::new(samples);
    let state = Arc::new(PlaybackState::default());

    let stream = match supported.sample_format() {
        SampleFormat::F32 => build_stream::<f32>(&device, &config, &samples, &state)?,
        SampleFormat::I16 => build_stream::<i16>(&device, &config, &samples, &state)?,
        SampleFormat::U16 => build_stream::<u16>(&device, &config, &samples, &state)?,
        sample_format => bail!("Unsupported sample format: {}", sample_format),
    };

    log::info!("Playing audio data...");
    stream.play()?;
    let limit = Duration::from_secs_f64(audio.duration()) + PLAYBACK_MARGIN;
    let waited = wait_for_playback(&state, limit);
    if waited.is_ok() {
        // Let the device drain its last buffer.
        std::thread::sleep(Duration::from_millis(100));
    }
    drop(stream);
    waited?;
    log::info!("Playback completed successfully");
    Ok(())
}

/// Blocks until the data callback has consumed every sample, the stream reports
/// an error, or `limit` elapses.
fn wait_for_playback(state: &PlaybackState, limit: Duration) -> Result<()> {
    let deadline = Instant::now() + limit;
    loop {
        let failure = state
            .failure
            .lock()
            .map_err(|_| anyhow!("Playback state poisoned"))?
            .take();
        if let Some(err) = failure {
            bail!("Audio stream error: {}", err);
        }
        if state.finished.load(Ordering::Acquire) {
            return Ok(());
        }
        if Instant::now() >= deadline {
            bail!(
                "Playback did not finish within {:.1}s ({} samples played)",
                limit.as_secs_f64(),
                state.position.load(Ordering::Relaxed)
            );
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    samples: &Arc<Vec<f32>>,
    state: &Arc<PlaybackState>,
) -> Result<cpal::Stream>
where
    T: Sample + FromSample<f32> + SizedSample,
{
    let channels = config.channels as usize;
    let samples = Arc::clone(samples);
    let data_state = Arc::clone(state);
    let error_state = Arc::clone(state);

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            let mut pos = data_state.position.load(Ordering::Relaxed);
            for frame in data.chunks_mut(channels) {
                let value = match samples.get(pos) {
                    Some(&s) => {
                        pos += 1;
                        s
                    }
                    None => 0.0,
                };
                let value = T::from_sample(value);
                for out in frame.iter_mut() {
                    *out = value;
                }
            }
            data_state.position.store(pos, Ordering::Relaxed);
            if pos >= samples.len() {
                data_state.finished.store(true, Ordering::Release);
            }
        },
        move |err| {
            log::error!("Audio stream error: {}", err);
            if let Ok(mut failure) = error_state.failure.lock() {
                failure.get_or_insert_with(|| err.to_string());
            }
        },
        None,
    )?;
    Ok(stream)
}

/// Converts mono samples between rates; returns the input unchanged when they match.
fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    if from_rate == to_rate {
        return Ok(samples.to_vec());
    }
    log::debug!("Resampling {}Hz -> {}Hz", from_rate, to_rate);

    let mut resampler = SincFixedIn::<f32>::new(
        to_rate as f64 / from_rate as f64,
        2.0,
        SincInterpolationParameters {
            sinc_len: 256,
            f_cutoff: 0.95,
            interpolation: SincInterpolationType::Linear,
            oversampling_factor: 256,
            window: WindowFunction::BlackmanHarris,
        },
        RESAMPLER_CHUNK_SIZE,
        1,
    )?;

    let mut out = Vec::with_capacity(samples.len() * to_rate as usize / from_rate as usize + 1);
    let mut rest = samples;
    while rest.len() >= resampler.input_frames_next() {
        let (chunk, tail) = rest.split_at(resampler.input_frames_next());
        out.extend(resampler.process(&[chunk], None)?.remove(0));
        rest = tail;
    }
    if !rest.is_empty() {
        out.extend(resampler.process_partial(Some(&[rest][..]), None)?.remove(0));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wait_returns_when_finished() {
        let state = PlaybackState::default();
        state.finished.store(true, Ordering::Release);
        assert!(wait_for_playback(&state, Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn test_wait_surfaces_stream_error() {
        let state = PlaybackState::default();
        *state.failure.lock().unwrap() = Some("device unplugged".to_string());
        let err = wait_for_playback(&state, Duration::from_secs(5)).unwrap_err();
        assert!(err.to_string().contains("device unplugged"));
    }

    #[test]
    fn test_wait_times_out_on_stalled_stream() {
        let state = PlaybackState::default();
        state.position.store(42, Ordering::Relaxed);
        let started = Instant::now();
        let err = wait_for_playback(&state, Duration::from_millis(60)).unwrap_err();
        assert!(err.to_string().contains("did not finish"));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_resample_same_rate_is_identity() {
        let samples = vec![0.0, 0.5, -0.5, 1.0];
        assert_eq!(resample(&samples, 44100, 44100).unwrap(), samples);
    }

    #[test]
    fn test_resample_scales_length() {
        let samples: Vec<f32> = (0..48000).map(|i| (i as f32 * 0.05).sin()).collect();
        let out = resample(&samples, 48000, 44100).unwrap();
        // The final partial chunk is zero-padded, so allow one extra chunk.
        assert!(out.len() >= 44100 * 9 / 10);
        assert!(out.len() <= 44100 + RESAMPLER_CHUNK_SIZE);
    }
}
