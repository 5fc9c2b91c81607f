//! Error types for configuration, board construction and persistence.
//!
//! The simulation tick itself never fails: geometry edge cases are skipped
//! inside the step. Everything that touches the outside world (config files,
//! save slots, restored boards) reports through [`GameError`].

use std::fmt;

/// Top-level error enum for the game core.
#[derive(Debug)]
pub enum GameError {
    /// Reading or writing a save file failed.
    Io(std::io::Error),

    /// A config or save payload was not valid JSON for its type.
    Json(serde_json::Error),

    /// A row did not have the board's column count.
    RowWidth {
        /// Column count the board expects.
        expected: usize,
        /// Width of the offending row.
        got: usize,
    },

    /// A restored board had the wrong number of rows.
    RowCount {
        /// Row count the config expects.
        expected: usize,
        /// Number of rows in the payload.
        got: usize,
    },

    /// A cell held a value outside `-1..` (only -1, 0 and positive are legal).
    InvalidCell {
        col: usize,
        row: usize,
        value: i32,
    },

    /// A configuration value is outside its usable range.
    InvalidConfig {
        /// Field name (for logging).
        name: &'static str,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },

    /// A save payload parsed but its contents are inconsistent.
    InvalidSave { reason: String },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Io(err) => write!(f, "save storage error: {}", err),
            GameError::Json(err) => write!(f, "malformed JSON: {}", err),
            GameError::RowWidth { expected, got } => {
                write!(f, "row has {} cells, board expects {}", got, expected)
            }
            GameError::RowCount { expected, got } => {
                write!(f, "board has {} rows, expected {}", got, expected)
            }
            GameError::InvalidCell { col, row, value } => {
                write!(f, "cell ({}, {}) holds illegal value {}", col, row, value)
            }
            GameError::InvalidConfig { name, expected } => {
                write!(f, "config value '{}' out of range: expected {}", name, expected)
            }
            GameError::InvalidSave { reason } => write!(f, "save rejected: {}", reason),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Io(err) => Some(err),
            GameError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GameError {
    fn from(err: std::io::Error) -> Self {
        GameError::Io(err)
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::Json(err)
    }
}
