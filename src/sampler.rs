// src/sampler.rs
// Renders token strings into audio, memoizing fixed-size symbol chunks

use crate::audio::AudioData;
use crate::cache::ChunkCache;
use crate::error::{Error, Result};
use crate::symbol::{MorseSymbol, TokenString, encode};
use crate::waveform::WaveformGenerator;
use std::rc::Rc;

pub const DEFAULT_CACHE_CAPACITY: usize = 256;

pub struct AudioSampler {
    sample_rate: u32,
    time_unit: f64,
    dit: Vec<f64>,
    dah: Vec<f64>,
    intra_character: Vec<f64>,
    inter_character: Vec<f64>,
    inter_word: Vec<f64>,
    cache: ChunkCache,
}

impl AudioSampler {
    /// Precomputes every symbol's sound; `time_unit` is one dit in seconds.
    pub fn new(generator: &dyn WaveformGenerator, time_unit: f64) -> Self {
        let silence = generator.silence();

        let sampler = Self {
            sample_rate: generator.sample_rate(),
            time_unit,
            dit: generator.sound(time_unit),
            dah: generator.sound(time_unit * 3.0),
            intra_character: silence.sound(time_unit),
            inter_character: silence.sound(time_unit * 3.0),
            inter_word: silence.sound(time_unit * 7.0),
            cache: ChunkCache::new(DEFAULT_CACHE_CAPACITY),
        };

        log::debug!("AudioSampler initialized with time_unit={}s", time_unit);
        log::debug!("AudioSampler cache capacity={}", DEFAULT_CACHE_CAPACITY);
        sampler
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache = ChunkCache::new(capacity);
        log::debug!("AudioSampler cache capacity={}", self.cache.capacity());
        self
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn time_unit(&self) -> f64 {
        self.time_unit
    }

    pub fn cache(&self) -> &ChunkCache {
        &self.cache
    }

    /// The precomputed sound for one symbol. Unknown characters render as an inter-character pause.
    pub fn sound_for(&self, symbol: MorseSymbol) -> &[f64] {
        match symbol {
            MorseSymbol::Dit => &self.dit,
            MorseSymbol::Dah => &self.dah,
            MorseSymbol::IntraCharacter => &self.intra_character,
            MorseSymbol::InterCharacter | MorseSymbol::Unknown => &self.inter_character,
            MorseSymbol::InterWord => &self.inter_word,
        }
    }

    /// Concatenates the sounds of `symbols` without consulting the cache.
    pub fn synthesize(&self, symbols: &[MorseSymbol]) -> Vec<f64> {
        let total = symbols.iter().map(|&s| self.sound_for(s).len()).sum();
        let mut out = Vec::with_capacity(total);
        for &symbol in symbols {
            out.extend_from_slice(self.sound_for(symbol));
        }
        out
    }

    pub fn produce_audio_data(&mut self, tokens: &TokenString, chunk_size: usize) -> Result<AudioData> {
        if chunk_size == 0 {
            return Err(Error::parameter("chunk size", "must be at least 1"));
        }
        if !tokens.is_valid() {
            let stray: Vec<MorseSymbol> = tokens
                .symbols()
                .iter()
                .filter(|s| !tokens.alphabet().contains(s))
                .copied()
                .collect();
            log::error!("Unknown token found: {}", encode(&stray));
            return Err(Error::SynthesisIntegrity(format!(
                "symbols {:?} are outside the token string's alphabet",
                encode(&stray)
            )));
        }

        let mut audio = Vec::new();
        for chunk in tokens.symbols().chunks(chunk_size) {
            let rendered = match self.cache.get(chunk) {
                Some(rendered) => rendered,
                None => {
                    let rendered: Rc<[f64]> = Rc::from(self.synthesize(chunk));
                    log::debug!("AudioSampler [cache] <- {}", encode(chunk));
                    self.cache.insert(chunk.to_vec(), Rc::clone(&rendered));
                    rendered
                }
            };
            audio.extend_from_slice(&rendered);
        }

        log::debug!(
            "AudioSampler produced {} samples from {} symbols (cache hits={}, misses={})",
            audio.len(),
            tokens.len(),
            self.cache.hits(),
            self.cache.misses()
        );
        Ok(AudioData::new(audio, self.sample_rate))
    }
}
