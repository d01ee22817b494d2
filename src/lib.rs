// src/lib.rs
// Library interface for morsetone

pub mod error;
pub mod morse;
pub mod note;
pub mod renderer;
pub mod sequencer;
pub mod tone;
pub mod wav;

pub use error::RenderError;
pub use morse::{MorseSymbol, from_morse_string, text_to_morse};
pub use note::{Tuning, note_to_frequency, tempo_to_dit_seconds};
pub use renderer::{RenderConfig, SampleRenderer, render_text};
pub use sequencer::{SequencerClock, SequencerStep};
pub use wav::{encode_wav, write_wav};
