// src/renderer.rs
// Walks the Morse timeline against the motif clock and lays down samples

use crate::error::{RenderError, Result};
use crate::morse::{self, MorseSymbol};
use crate::note::Tuning;
use crate::sequencer::{SequencerClock, SequencerStep};
use crate::tone;

pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
pub const DEFAULT_TEMPO_BPM: f64 = 160.0;
pub const DEFAULT_FADE_SECONDS: f64 = 0.005;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub sample_rate: u32,
    pub dit_seconds: f64,
    pub fade_seconds: f64,
    /// Word gaps appended to the text before rendering.
    pub trailing_word_gaps: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::from_tempo(DEFAULT_SAMPLE_RATE, DEFAULT_TEMPO_BPM, &Tuning::default())
    }
}

impl RenderConfig {
    pub fn from_tempo(sample_rate: u32, bpm: f64, tuning: &Tuning) -> Self {
        Self {
            sample_rate,
            dit_seconds: tuning.dit_seconds(bpm),
            fade_seconds: DEFAULT_FADE_SECONDS,
            trailing_word_gaps: 2,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(RenderError::InvalidSequence("sample rate must be positive".into()));
        }
        if !(self.dit_seconds.is_finite() && self.dit_seconds > 0.0) {
            return Err(RenderError::InvalidSequence(format!(
                "dit length must be positive, got {}",
                self.dit_seconds
            )));
        }
        if !(self.fade_seconds.is_finite() && self.fade_seconds >= 0.0) {
            return Err(RenderError::InvalidSequence(format!(
                "fade must be non-negative, got {}",
                self.fade_seconds
            )));
        }
        Ok(())
    }

    /// Sample index at which `cumulative_dits` of the dit clock ends.
    pub fn samples_at(&self, cumulative_dits: u64) -> usize {
        (cumulative_dits as f64 * self.dit_seconds * self.sample_rate as f64).round() as usize
    }
}

/// Dot and dash bursts for one sequencer step.
struct BurstCache {
    step: usize,
    dot: Vec<i16>,
    dash: Vec<i16>,
}

struct RenderState {
    cumulative_dits: u64,
    bursts: BurstCache,
    output: Vec<i16>,
}

pub struct SampleRenderer {
    config: RenderConfig,
}

impl SampleRenderer {
    pub fn new(config: RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render `symbols` from the start of the motif held by `clock`.
    ///
    /// After every symbol the buffer is padded with silence up to the sample
    /// position of the dit clock, so the rounding of individual bursts never
    /// accumulates. The buffer never shrinks if a burst overshoots.
    pub fn render(&self, symbols: &[MorseSymbol], clock: &mut SequencerClock) -> Vec<i16> {
        clock.reset();
        let first = clock.advance(0);
        let mut state = RenderState {
            cumulative_dits: 0,
            bursts: self.bursts_for(clock, first),
            output: Vec::with_capacity(self.config.samples_at(morse::total_dits(symbols))),
        };

        for &symbol in symbols {
            let step = clock.advance(state.cumulative_dits);
            if step != state.bursts.step {
                state.bursts = self.bursts_for(clock, step);
            }

            match symbol {
                MorseSymbol::Dot => state.output.extend_from_slice(&state.bursts.dot),
                MorseSymbol::Dash => state.output.extend_from_slice(&state.bursts.dash),
                MorseSymbol::IntraCharacterGap | MorseSymbol::InterWordGap => {}
            }

            state.cumulative_dits += symbol.dit_cost();
            self.pad_to_clock(&mut state.output, state.cumulative_dits);
        }

        log::debug!(
            "Rendered {} symbols over {} dits into {} samples",
            symbols.len(),
            state.cumulative_dits,
            state.output.len()
        );
        state.output
    }

    fn bursts_for(&self, clock: &SequencerClock, step: usize) -> BurstCache {
        let frequency_hz = clock
            .step(step)
            .map(|s| s.frequency_hz)
            .unwrap_or_default();
        log::debug!("Synthesizing bursts for step {} at {:.2} Hz", step, frequency_hz);

        let RenderConfig {
            sample_rate,
            dit_seconds,
            fade_seconds,
            ..
        } = self.config;
        BurstCache {
            step,
            dot: tone::synthesize(frequency_hz, sample_rate, dit_seconds, fade_seconds),
            dash: tone::synthesize(frequency_hz, sample_rate, dit_seconds * 3.0, fade_seconds),
        }
    }

    fn pad_to_clock(&self, output: &mut Vec<i16>, cumulative_dits: u64) {
        let expected = self.config.samples_at(cumulative_dits);
        if expected > output.len() {
            output.resize(expected, 0);
        }
    }
}

/// Translate `text` to Morse and render it over `motif`.
pub fn render_text(text: &str, motif: Vec<SequencerStep>, config: &RenderConfig) -> Result<Vec<i16>> {
    let mut clock = SequencerClock::new(motif)?;
    let renderer = SampleRenderer::new(config.clone())?;

    let morse_code = morse::text_to_morse(text, config.trailing_word_gaps);
    log::info!("Morse: {}", morse_code);
    let symbols = morse::from_morse_string(&morse_code);

    let samples = renderer.render(&symbols, &mut clock);
    log::info!(
        "Rendered {:.2}s of audio ({} samples at {} Hz)",
        samples.len() as f64 / config.sample_rate as f64,
        samples.len(),
        config.sample_rate
    );
    Ok(samples)
}
