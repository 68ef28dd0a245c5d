use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Grid axis. Structural edits and header names are always per-axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Row,
    Column,
}

impl Axis {
    pub fn name(&self) -> &'static str {
        match self {
            Axis::Row => "row",
            Axis::Column => "column",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A rectangular range of cells, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl Range {
    /// Create a new range, automatically normalizing so start <= end.
    pub fn new(r1: usize, c1: usize, r2: usize, c2: usize) -> Self {
        Self {
            start_row: r1.min(r2),
            start_col: c1.min(c2),
            end_row: r1.max(r2),
            end_col: c1.max(c2),
        }
    }

    /// Create a single-cell range.
    pub fn single(row: usize, col: usize) -> Self {
        Self::new(row, col, row, col)
    }

    /// Check if this range contains a cell.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.start_row && row <= self.end_row &&
        col >= self.start_col && col <= self.end_col
    }

    /// Iterate over all cells in this range (row-major order).
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let (start_col, end_col) = (self.start_col, self.end_col);
        (self.start_row..=self.end_row).flat_map(move |r| {
            (start_col..=end_col).map(move |c| (r, c))
        })
    }
}

/// A grid selection: every selected row crossed with every selected column.
///
/// This matches a table widget in multi-interval cell selection mode, where the
/// selected cells are reported as two independent index sets. Dragging over
/// `(1,2)` and then ctrl-clicking `(3,4)` selects all four of `(1,2) (1,4) (3,2) (3,4)`.
///
/// Indices are DATA coordinates. Use [`Selection::from_band_indices`] when the
/// widget renders the header band at index 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    rows: BTreeSet<usize>,
    cols: BTreeSet<usize>,
}

impl Selection {
    pub fn new(rows: impl IntoIterator<Item = usize>, cols: impl IntoIterator<Item = usize>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
            cols: cols.into_iter().collect(),
        }
    }

    /// Select a single cell.
    pub fn single(row: usize, col: usize) -> Self {
        Self::new([row], [col])
    }

    /// Union of the rows and union of the columns covered by the ranges.
    pub fn from_ranges(ranges: &[Range]) -> Self {
        let mut selection = Self::default();
        for range in ranges {
            selection.rows.extend(range.start_row..=range.end_row);
            selection.cols.extend(range.start_col..=range.end_col);
        }
        selection
    }

    /// Convert widget indices that include the header band at index 0.
    ///
    /// Index 0 is dropped and every other index shifts down by one, so header
    /// cells never leak into border coordinates.
    pub fn from_band_indices(
        rows: impl IntoIterator<Item = usize>,
        cols: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self::new(
            rows.into_iter().filter(|&r| r > 0).map(|r| r - 1),
            cols.into_iter().filter(|&c| c > 0).map(|c| c - 1),
        )
    }

    pub fn rows(&self) -> &BTreeSet<usize> {
        &self.rows
    }

    pub fn cols(&self) -> &BTreeSet<usize> {
        &self.cols
    }

    /// True if either axis is empty (the cross product has no cells).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.cols.is_empty()
    }

    /// Minimum selected row and minimum selected column.
    pub fn origin(&self) -> Option<(usize, usize)> {
        Some((*self.rows.first()?, *self.cols.first()?))
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.rows.contains(&row) && self.cols.contains(&col)
    }

    pub fn cell_count(&self) -> usize {
        self.rows.len() * self.cols.len()
    }

    /// Iterate over all selected cells (row-major order).
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows
            .iter()
            .flat_map(move |&r| self.cols.iter().map(move |&c| (r, c)))
    }
}
