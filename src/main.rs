use anyhow::{Context, Result};
use clap::Parser;
use cwi::config::{DEFAULT_CHUNK_SIZE, Settings};
use cwi::sampler::DEFAULT_CACHE_CAPACITY;
use cwi::{App, AudioData, CodeTable, Error, ToneShape};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about = "Convert text into Morse code audio", long_about = None)]
struct Cli {
    /// Message to encode; words are joined with single spaces
    #[arg(value_name = "MESSAGE")]
    message: Vec<String>,

    /// Type of audio tone generator used
    #[arg(short = 't', long, value_enum, default_value_t = ToneShape::Sine)]
    tone_generator_type: ToneShape,

    /// Audio tone generator frequency in Hz (80-8000)
    #[arg(short, long, default_value_t = 800.0)]
    frequency: f64,

    /// Output sampling rate in Hz, for playback and WAV files
    #[arg(short = 'r', long, default_value_t = 44100,
          value_parser = clap::value_parser!(u32).range(8000..=96000))]
    sample_rate: u32,

    /// Words per minute; sets the duration of each Morse signal
    #[arg(short, long, default_value_t = 20,
          value_parser = clap::value_parser!(u32).range(5..=30))]
    words_per_minute: u32,

    /// Read the message from this UTF-8 file instead of MESSAGE
    #[arg(short, long, value_name = "FILE")]
    input_file: Option<PathBuf>,

    /// Write a WAV file instead of playing the audio
    #[arg(short, long, value_name = "FILE")]
    output_file: Option<PathBuf>,

    /// JSON object of single characters to codes, replacing the built-in table
    #[arg(long, value_name = "FILE")]
    code_table: Option<PathBuf>,

    /// Symbols rendered per cached chunk
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Show debug information
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // `RUST_LOG` picks the level unless --debug forces it.
    let mut logger = env_logger::Builder::from_default_env();
    if cli.debug {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let started = Instant::now();

    let settings = Settings {
        shape: cli.tone_generator_type,
        frequency: cli.frequency,
        sample_rate: cli.sample_rate,
        words_per_minute: cli.words_per_minute,
        chunk_size: cli.chunk_size,
        cache_capacity: DEFAULT_CACHE_CAPACITY,
    };
    let table = match &cli.code_table {
        Some(path) => CodeTable::from_json_file(path)
            .with_context(|| format!("Failed to load code table from {:?}", path))?,
        None => CodeTable::default(),
    };
    let mut app = App::new(settings, table).context("Cannot proceed without a valid configuration")?;

    let text = match &cli.input_file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read message from {:?}", path))?;
            log::info!("Message read from {:?}", path);
            text
        }
        None => cli.message.join(" "),
    };

    let message = match app.compose(&text) {
        Ok(message) => message,
        Err(Error::EmptyInput) => {
            log::error!("Cannot proceed without message!");
            println!("--- CRITICAL ---");
            println!("No input provided");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };
    log::info!("Command invoked with message: {}", message.actual());

    print_settings(app.settings(), app.dit_duration());
    println!("\nOriginal:\n> {}", message.actual());
    println!("\nMorse:\n> {}", message.readable());

    if !message.unknown_characters().is_empty() {
        let unknown: Vec<String> = message.unknown_characters().iter().map(char::to_string).collect();
        println!("\n--- Warning ---");
        println!("Unknown characters found in message: {}", unknown.join(" "));
    }

    let render_started = Instant::now();
    let audio = app.render(&message)?;
    log::debug!(
        "Rendered {} samples ({:.2}s of audio) in {:?}",
        audio.len(),
        audio.duration(),
        render_started.elapsed()
    );

    match &cli.output_file {
        Some(path) => audio
            .write_wav(path)
            .with_context(|| format!("Failed to write {:?}", path))?,
        None => play(&audio)?,
    }

    log::debug!("Total: {:?}", started.elapsed());
    println!("\nCompleted in {:.2}s", started.elapsed().as_secs_f64());
    Ok(())
}

fn print_settings(settings: &Settings, dit_duration: f64) {
    println!("WPM: {}", settings.words_per_minute);
    println!("Dot duration: {}", dit_duration);
    println!("Sample rate: {}", settings.sample_rate);
    println!("Frequency: {}", settings.frequency);
    println!("Tone: {}", settings.shape);
}

#[cfg(feature = "playback")]
fn play(audio: &AudioData) -> Result<()> {
    cwi::playback::play(audio)
}

#[cfg(not(feature = "playback"))]
fn play(_audio: &AudioData) -> Result<()> {
    anyhow::bail!("Built without the `playback` feature; use --output-file to write a WAV file instead")
}
