//! Error types for position setup.

use std::fmt;

/// Error type for building or updating a [`Position`](super::Position) from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// The FEN string was rejected by the board library
    InvalidFen { fen: String, reason: String },
    /// No legal move matches the given UCI notation
    IllegalMove { notation: String },
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::InvalidFen { fen, reason } => {
                write!(f, "Invalid FEN '{fen}': {reason}")
            }
            PositionError::IllegalMove { notation } => {
                write!(f, "Illegal move '{notation}'")
            }
        }
    }
}

impl std::error::Error for PositionError {}
