use std::fmt;

use borderline_core::Axis;

/// Recoverable conditions raised by grid edits. None of them are fatal to a session;
/// every variant leaves the grid exactly as it was before the failed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Non-numeric or non-positive row/column count.
    InvalidDimensions(String),
    /// Header write rejected because another line on the axis already uses the text.
    DuplicateHeader { axis: Axis, index: usize, text: String },
    /// Removal would leave the grid without a data line on this axis.
    MinimumSizeViolation { axis: Axis },
    /// Paste attempted before anything was copied.
    EmptyClipboard,
    /// Copy, paste or edit issued with no selected cells.
    EmptySelection,
    /// Edit issued before a table was created.
    NoTable,
    /// Coordinate outside the current grid.
    OutOfBounds { row: usize, col: usize },
    /// Header slot that cannot be addressed (the corner, or past the end).
    InvalidHeaderIndex { axis: Axis, index: usize },
    /// Restored header list does not match the grid size.
    MismatchedHeaders { axis: Axis, expected: usize, found: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions(input) => {
                write!(f, "invalid dimensions '{input}': expected positive integers")
            }
            Self::DuplicateHeader { axis, index, text } => {
                write!(f, "{axis} header '{text}' already exists (edit at index {index} rejected)")
            }
            Self::MinimumSizeViolation { axis } => {
                write!(f, "cannot remove the last remaining {axis}")
            }
            Self::EmptyClipboard => write!(f, "no borders copied to paste"),
            Self::EmptySelection => write!(f, "no cells selected"),
            Self::NoTable => write!(f, "no table has been created"),
            Self::OutOfBounds { row, col } => write!(f, "cell ({row}, {col}) is outside the grid"),
            Self::InvalidHeaderIndex { axis, index } => {
                write!(f, "{axis} header index {index} is not editable")
            }
            Self::MismatchedHeaders { axis, expected, found } => {
                write!(f, "expected {expected} {axis} headers, found {found}")
            }
        }
    }
}

impl std::error::Error for GridError {}
