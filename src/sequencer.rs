// src/sequencer.rs
// The background motif: an ordered list of (dits, frequency) steps walked once

use crate::error::{RenderError, Result};
use crate::note::Tuning;

/// Duration given to the final step so the motif outlasts any message.
pub const HOLD_DITS: u64 = 999_999_999;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequencerStep {
    pub duration_dits: u64,
    pub frequency_hz: f64,
}

impl SequencerStep {
    pub fn new(duration_dits: u64, frequency_hz: f64) -> Self {
        Self {
            duration_dits,
            frequency_hz,
        }
    }

    /// A step that stays active for [`HOLD_DITS`].
    pub fn hold(frequency_hz: f64) -> Self {
        Self::new(HOLD_DITS, frequency_hz)
    }
}

/// Walks a motif forward as cumulative dit time grows.
///
/// The cursor only ever moves forward. A query that does not cross the end of
/// the current step leaves the clock untouched.
#[derive(Debug, Clone)]
pub struct SequencerClock {
    steps: Vec<SequencerStep>,
    cursor: usize,
    step_start: u64,
    exhaustion_reported: bool,
}

impl SequencerClock {
    pub fn new(steps: Vec<SequencerStep>) -> Result<Self> {
        if steps.is_empty() {
            return Err(RenderError::InvalidSequence("motif has no steps".into()));
        }
        for (i, step) in steps.iter().enumerate() {
            if step.duration_dits == 0 {
                return Err(RenderError::InvalidSequence(format!(
                    "step {i} has zero duration"
                )));
            }
            if !(step.frequency_hz.is_finite() && step.frequency_hz > 0.0) {
                return Err(RenderError::InvalidSequence(format!(
                    "step {i} has invalid frequency {}",
                    step.frequency_hz
                )));
            }
        }

        Ok(Self {
            steps,
            cursor: 0,
            step_start: 0,
            exhaustion_reported: false,
        })
    }

    fn step_boundary(&self) -> u64 {
        self.step_start
            .saturating_add(self.steps[self.cursor].duration_dits)
    }

    /// Move past every step that has fully elapsed by `cumulative_dits` and
    /// return the index of the active step.
    ///
    /// Fails with [`RenderError::SequencerExhausted`] when the final step has
    /// elapsed too; the cursor is then left on the final step.
    pub fn try_advance(&mut self, cumulative_dits: u64) -> Result<usize> {
        while cumulative_dits >= self.step_boundary() {
            if self.cursor + 1 == self.steps.len() {
                return Err(RenderError::SequencerExhausted {
                    cumulative_dits,
                    total_dits: self.total_dits(),
                });
            }
            self.step_start = self.step_boundary();
            self.cursor += 1;
            log::debug!(
                "Sequencer step {} ({:.2} Hz) starts at dit {}",
                self.cursor,
                self.steps[self.cursor].frequency_hz,
                self.step_start
            );
        }
        Ok(self.cursor)
    }

    /// Like [`try_advance`](Self::try_advance), but holds the final step once
    /// the motif has run out.
    pub fn advance(&mut self, cumulative_dits: u64) -> usize {
        match self.try_advance(cumulative_dits) {
            Ok(index) => index,
            Err(e) => {
                if !self.exhaustion_reported {
                    log::warn!("{e}; holding the final step");
                    self.exhaustion_reported = true;
                }
                self.cursor
            }
        }
    }

    pub fn current_frequency(&mut self, cumulative_dits: u64) -> f64 {
        let index = self.advance(cumulative_dits);
        self.steps[index].frequency_hz
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn step(&self, index: usize) -> Option<&SequencerStep> {
        self.steps.get(index)
    }

    pub fn steps(&self) -> &[SequencerStep] {
        &self.steps
    }

    pub fn total_dits(&self) -> u64 {
        self.steps
            .iter()
            .fold(0u64, |acc, s| acc.saturating_add(s.duration_dits))
    }

    /// Rewind to the first step.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.step_start = 0;
        self.exhaustion_reported = false;
    }
}

/// A single held tone.
pub fn drone(frequency_hz: f64) -> Vec<SequencerStep> {
    vec![SequencerStep::hold(frequency_hz)]
}

const ARPEGGIO_STEP_DITS: u64 = 8;

const C_MAJOR_PHRASE: [f64; 12] = [
    523.25, 587.33, 659.25, 783.99, 1046.50, 1174.66, 1318.51, 1174.66, 1046.50, 783.99, 659.25,
    587.33,
];
const A_MINOR_PHRASE: [f64; 12] = [
    440.00, 493.88, 523.25, 659.25, 880.00, 987.77, 1046.50, 987.77, 880.00, 659.25, 523.25,
    493.88,
];
const F_MAJOR_PHRASE: [f64; 12] = [
    349.23, 392.00, 440.00, 523.25, 698.46, 783.99, 880.00, 783.99, 698.46, 523.25, 440.00,
    392.00,
];

/// Rising and falling arpeggios over C, Am and F (each phrase played twice,
/// one step per beat at 8 dits per step), then a held A4.
pub fn arpeggio() -> Vec<SequencerStep> {
    let mut steps: Vec<SequencerStep> = [C_MAJOR_PHRASE, A_MINOR_PHRASE, F_MAJOR_PHRASE]
        .iter()
        .flat_map(|phrase| phrase.iter().chain(phrase.iter()))
        .map(|&hz| SequencerStep::new(ARPEGGIO_STEP_DITS, hz))
        .collect();
    steps.push(SequencerStep::hold(440.0));
    steps
}

/// Parse a motif written as `DITS:NOTE` entries separated by whitespace or
/// commas, e.g. `"8:C5 8:E5, 16:G5"`. A note may also be a plain frequency in
/// Hz. The last entry is always held for [`HOLD_DITS`].
pub fn parse_motif(text: &str, tuning: &Tuning) -> Result<Vec<SequencerStep>> {
    let mut steps = text
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|entry| !entry.is_empty())
        .map(|entry| parse_step(entry, tuning))
        .collect::<Result<Vec<_>>>()?;

    match steps.last_mut() {
        Some(last) => last.duration_dits = HOLD_DITS,
        None => return Err(RenderError::InvalidSequence("motif is empty".into())),
    }
    Ok(steps)
}

fn parse_step(entry: &str, tuning: &Tuning) -> Result<SequencerStep> {
    let (dits, pitch) = entry.split_once(':').ok_or_else(|| {
        RenderError::InvalidSequence(format!("expected DITS:NOTE, got {entry:?}"))
    })?;

    let duration_dits: u64 = dits
        .parse()
        .ok()
        .filter(|&d| d > 0)
        .ok_or_else(|| RenderError::InvalidSequence(format!("bad step length in {entry:?}")))?;

    let frequency_hz = match pitch.parse::<f64>() {
        Ok(hz) if hz.is_finite() && hz > 0.0 => hz,
        Ok(_) => {
            return Err(RenderError::InvalidSequence(format!(
                "bad frequency in {entry:?}"
            )));
        }
        Err(_) => tuning.note_to_frequency(pitch)?,
    };

    Ok(SequencerStep::new(duration_dits, frequency_hz))
}
