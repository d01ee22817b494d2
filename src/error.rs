use std::fmt;

#[derive(Debug)]
pub enum RenderError {
    /// Note name with an unknown letter or a missing/out-of-range octave.
    InvalidNote(String),
    /// Motif or render settings rejected at construction time.
    InvalidSequence(String),
    /// Cumulative dit time ran past the end of the motif.
    SequencerExhausted { cumulative_dits: u64, total_dits: u64 },
    Io(std::io::Error),
    Wav(hound::Error),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::InvalidNote(note) => write!(f, "invalid note: {note}"),
            RenderError::InvalidSequence(reason) => write!(f, "invalid sequence: {reason}"),
            RenderError::SequencerExhausted {
                cumulative_dits,
                total_dits,
            } => write!(
                f,
                "sequencer exhausted at dit {cumulative_dits} (motif spans {total_dits} dits)"
            ),
            RenderError::Io(e) => write!(f, "I/O error: {e}"),
            RenderError::Wav(e) => write!(f, "WAV error: {e}"),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Io(e) => Some(e),
            RenderError::Wav(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        RenderError::Io(e)
    }
}

impl From<hound::Error> for RenderError {
    fn from(e: hound::Error) -> Self {
        match e {
            hound::Error::IoError(io) => RenderError::Io(io),
            other => RenderError::Wav(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
