// src/note.rs
// Note names, tuning and tempo conversions

use crate::error::{RenderError, Result};

const NOTES_IN_OCTAVE: i32 = 12;
const TOP_OCTAVE: i32 = 8;

/// Tuning parameters that would otherwise be global constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// Frequency of A4 in Hz.
    pub reference_a4_hz: f64,
    /// Dits per beat when converting a tempo to a dit length.
    pub dits_per_beat: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            reference_a4_hz: 440.0,
            dits_per_beat: 8,
        }
    }
}

impl Tuning {
    /// Frequency of a note such as `A4`, `c#5` or `F#3`.
    pub fn note_to_frequency(&self, note: &str) -> Result<f64> {
        let upper = note.trim().to_ascii_uppercase();
        let invalid = || RenderError::InvalidNote(note.to_string());

        let octave_start = upper
            .find(|c: char| c.is_ascii_digit() || c == '-' || c == '+')
            .ok_or_else(invalid)?;
        if octave_start == 0 {
            return Err(invalid());
        }

        let (name, octave) = upper.split_at(octave_start);
        let position = semitones_from_a(name).ok_or_else(invalid)?;
        let octave: i32 = octave.parse().map_err(|_| invalid())?;
        if !(0..=TOP_OCTAVE).contains(&octave) {
            return Err(invalid());
        }

        let half_steps = position + (octave - 4) * NOTES_IN_OCTAVE;
        Ok(self.reference_a4_hz * 2f64.powf(half_steps as f64 / NOTES_IN_OCTAVE as f64))
    }

    /// Length of one dit in seconds at `bpm` beats per minute.
    pub fn dit_seconds(&self, bpm: f64) -> f64 {
        60.0 / bpm / self.dits_per_beat as f64
    }
}

fn semitones_from_a(name: &str) -> Option<i32> {
    let position = match name {
        "C" => -9,
        "C#" => -8,
        "D" => -7,
        "D#" => -6,
        "E" => -5,
        "F" => -4,
        "F#" => -3,
        "G" => -2,
        "G#" => -1,
        "A" => 0,
        "A#" => 1,
        "B" => 2,
        _ => return None,
    };
    Some(position)
}

/// [`Tuning::note_to_frequency`] with A4 = 440 Hz.
pub fn note_to_frequency(note: &str) -> Result<f64> {
    Tuning::default().note_to_frequency(note)
}

/// [`Tuning::dit_seconds`] with 8 dits per beat.
pub fn tempo_to_dit_seconds(bpm: f64) -> f64 {
    Tuning::default().dit_seconds(bpm)
}
