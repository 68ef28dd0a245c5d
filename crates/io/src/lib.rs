// Border data persistence

pub mod item;
pub mod lines;

use std::fmt;

use borderline_engine::GridError;

/// Errors raised while reading or writing persisted border data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// No `DIMENSIONS` record before the first border record (or no records at all).
    MissingDimensions,
    /// A second `DIMENSIONS` record. `line` is 1-based.
    DuplicateDimensions { line: usize },
    /// A record that does not parse. `line` is 1-based.
    Malformed { line: usize, message: String },
    /// The data parsed but describes an invalid grid.
    Grid(GridError),
    Json(String),
    Io(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "missing DIMENSIONS record"),
            Self::DuplicateDimensions { line } => {
                write!(f, "line {line}: DIMENSIONS declared more than once")
            }
            Self::Malformed { line, message } => write!(f, "line {line}: {message}"),
            Self::Grid(err) => write!(f, "{err}"),
            Self::Json(msg) => write!(f, "JSON error: {msg}"),
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GridError> for FormatError {
    fn from(err: GridError) -> Self {
        Self::Grid(err)
    }
}

impl From<std::io::Error> for FormatError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
