use std::fmt;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Width => f.write_str("width"),
            Self::Height => f.write_str("height"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("input has wrong size (expected {expected} bytes, got {actual})")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("image has wrong {axis} (expected {expected}, got {actual})")]
    Dimension {
        axis: Axis,
        expected: usize,
        actual: usize,
    },

    #[error("polyphony detected: note on was {note_on}, note off was {note_off}")]
    Polyphony { note_on: u8, note_off: u8 },

    #[error("note {key} is never released")]
    UnterminatedNote { key: u8 },
}
