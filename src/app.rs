// src/app.rs
// Wires settings, tokenizer and sampler into one text-to-audio pipeline

use crate::audio::AudioData;
use crate::codes::CodeTable;
use crate::config::Settings;
use crate::error::Result;
use crate::message::Message;
use crate::sampler::AudioSampler;
use crate::tokenizer::Tokenizer;
use crate::waveform::ToneGenerator;

pub struct App {
    settings: Settings,
    tokenizer: Tokenizer,
    sampler: AudioSampler,
}

impl App {
    /// Configuration errors (bad ranges, invalid code table) surface here, before any text is processed.
    pub fn new(settings: Settings, table: CodeTable) -> Result<Self> {
        settings.validate()?;

        let generator = ToneGenerator::new(settings.shape, settings.frequency, settings.sample_rate)?;
        let tokenizer = Tokenizer::new(table)?;
        let sampler = AudioSampler::new(&generator, settings.dit_duration())
            .with_cache_capacity(settings.cache_capacity);

        log::info!(
            "WPM: {}, dot duration: {}s",
            settings.words_per_minute,
            settings.dit_duration()
        );
        log::info!(
            "Sample rate: {}, frequency: {}, tone: {}",
            settings.sample_rate,
            settings.frequency,
            settings.shape
        );
        log::debug!("Chunk size: {}", settings.chunk_size);

        Ok(Self {
            settings,
            tokenizer,
            sampler,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn dit_duration(&self) -> f64 {
        self.settings.dit_duration()
    }

    pub fn compose(&self, text: &str) -> Result<Message> {
        Message::from_text(text, &self.tokenizer)
    }

    pub fn render(&mut self, message: &Message) -> Result<AudioData> {
        self.sampler
            .produce_audio_data(message.tokens(), self.settings.chunk_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::waveform::ToneShape;

    #[test]
    fn test_render_message() {
        let settings = Settings {
            sample_rate: 8000,
            ..Default::default()
        };
        let mut app = App::new(settings, CodeTable::default()).unwrap();
        let message = app.compose("e").unwrap();
        let audio = app.render(&message).unwrap();
        // dit + inter-character gap = 4 units of 480 samples
        assert_eq!(audio.len(), 1920);
        assert_eq!(audio.sample_rate(), 8000);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            words_per_minute: 100,
            ..Default::default()
        };
        assert!(App::new(settings, CodeTable::default()).err().unwrap().is_configuration());
    }

    #[test]
    fn test_invalid_table_rejected() {
        let table = CodeTable::from_pairs([('A', "")]).unwrap();
        let settings = Settings {
            shape: ToneShape::Square,
            ..Default::default()
        };
        assert!(matches!(
            App::new(settings, table),
            Err(Error::InvalidCodeTable { .. })
        ));
    }

    #[test]
    fn test_empty_message() {
        let app = App::new(Settings::default(), CodeTable::default()).unwrap();
        assert!(matches!(app.compose("   "), Err(Error::EmptyInput)));
    }
}
