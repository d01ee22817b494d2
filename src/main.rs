use anyhow::{Result, bail};
use clap::{Parser, ValueEnum};
use morsetone::renderer::{DEFAULT_SAMPLE_RATE, DEFAULT_TEMPO_BPM};
use morsetone::{RenderConfig, Tuning, render_text, sequencer, write_wav};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Motif {
    /// One held tone at --note
    Drone,
    /// C / Am / F arpeggios, then a held A4
    Arpeggio,
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Text to play as Morse code
    #[arg(value_name = "TEXT")]
    text: String,

    /// Output sample rate in Hz
    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,

    /// Tempo in beats per minute (8 dits per beat)
    #[arg(long, default_value_t = DEFAULT_TEMPO_BPM)]
    tempo: f64,

    /// Pitch of the drone motif, e.g. A5 or F#4
    #[arg(long, default_value = "A5")]
    note: String,

    /// Frequency of A4 in Hz
    #[arg(long, default_value_t = 440.0)]
    reference: f64,

    /// Fade in/out length of each tone in milliseconds
    #[arg(long, default_value_t = 5.0)]
    fade_ms: f64,

    /// Background motif the Morse tones follow
    #[arg(long, value_enum, default_value_t = Motif::Drone)]
    motif: Motif,

    /// Custom motif as DITS:NOTE entries, e.g. "8:C5 8:E5 8:G5"; overrides --motif
    #[arg(long)]
    steps: Option<String>,

    /// Word gaps appended after the text
    #[arg(long, default_value_t = 2)]
    trailing_gaps: usize,

    /// Path of the WAV file to write
    #[arg(short, long, default_value = "output.wav")]
    output: PathBuf,
}

fn main() -> Result<()> {
    // Set up logging. Use `RUST_LOG=info` or `RUST_LOG=debug` to see output.
    env_logger::init();
    let cli = Cli::parse();

    if !(cli.tempo.is_finite() && cli.tempo > 0.0) {
        bail!("Tempo must be a positive number of beats per minute, got {}", cli.tempo);
    }
    if !(cli.reference.is_finite() && cli.reference > 0.0) {
        bail!("Reference pitch must be positive, got {}", cli.reference);
    }

    let tuning = Tuning {
        reference_a4_hz: cli.reference,
        ..Tuning::default()
    };

    let motif = match (&cli.steps, cli.motif) {
        (Some(steps), _) => sequencer::parse_motif(steps, &tuning)?,
        (None, Motif::Drone) => sequencer::drone(tuning.note_to_frequency(&cli.note)?),
        (None, Motif::Arpeggio) => sequencer::arpeggio(),
    };
    log::info!("Motif has {} steps", motif.len());

    let config = RenderConfig {
        fade_seconds: cli.fade_ms / 1000.0,
        trailing_word_gaps: cli.trailing_gaps,
        ..RenderConfig::from_tempo(cli.sample_rate, cli.tempo, &tuning)
    };
    log::info!("Render config: {:?}", config);

    let samples = render_text(&cli.text, motif, &config)?;
    write_wav(&cli.output, config.sample_rate, &samples)?;

    println!("WAV file saved to {}", cli.output.display());

    Ok(())
}
