// src/lib.rs
// Library interface for cwi

pub mod app;
pub mod audio;
pub mod cache;
pub mod codes;
pub mod config;
pub mod error;
pub mod message;
#[cfg(feature = "playback")]
pub mod playback;
pub mod sampler;
pub mod symbol;
pub mod tokenizer;
pub mod waveform;

pub use app::App;
pub use audio::AudioData;
pub use codes::CodeTable;
pub use config::Settings;
pub use error::{Error, Result};
pub use message::Message;
pub use sampler::AudioSampler;
pub use symbol::{MorseSymbol, TokenString};
pub use tokenizer::{Tokenizer, purify};
pub use waveform::{SilenceGenerator, ToneGenerator, ToneShape, WaveformGenerator};
