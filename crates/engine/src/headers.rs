//! Row and column header names.
//!
//! Each axis is a list index-aligned with the rendered header band: index 0 is
//! the unused corner (always empty), index `i > 0` labels data line `i - 1`.
//!
//! Invariant: the non-empty names on one axis are pairwise distinct, and every
//! slot except the corner is non-empty.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use borderline_core::Axis;

use crate::error::GridError;

/// Prefixes used for generated header names (`"{prefix} {i}"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderNaming {
    pub row_prefix: String,
    pub column_prefix: String,
}

impl Default for HeaderNaming {
    fn default() -> Self {
        Self {
            row_prefix: "Row".into(),
            column_prefix: "Header".into(),
        }
    }
}

/// One axis worth of header names.
#[derive(Debug, Clone, PartialEq, Eq)]
struct HeaderList {
    axis: Axis,
    prefix: String,
    names: Vec<String>,
}

impl HeaderList {
    fn new(axis: Axis, prefix: &str, count: usize) -> Self {
        let names = std::iter::once(String::new())
            .chain((1..=count).map(|i| format!("{prefix} {i}")))
            .collect();
        Self {
            axis,
            prefix: prefix.to_string(),
            names,
        }
    }

    /// Restore persisted names. Blank slots are filled, duplicates rejected.
    fn from_names(axis: Axis, prefix: &str, names: Vec<String>) -> Result<Self, GridError> {
        let mut list = Self {
            axis,
            prefix: prefix.to_string(),
            names: vec![String::new()],
        };
        let mut taken: FxHashSet<String> = FxHashSet::default();
        for (offset, name) in names.iter().enumerate() {
            let name = name.trim();
            if !name.is_empty() && !taken.insert(name.to_string()) {
                return Err(GridError::DuplicateHeader {
                    axis,
                    index: offset + 1,
                    text: name.to_string(),
                });
            }
            list.names.push(name.to_string());
        }

        // Blank slots are generated after all explicit names are known
        let mut next = 1;
        for index in 1..list.names.len() {
            if list.names[index].is_empty() {
                list.names[index] = list.claim_free(&mut taken, &mut next);
            }
        }
        Ok(list)
    }

    /// Smallest `i >= 1` such that `"{prefix} {i}"` is not taken.
    fn generate_unique(&self) -> String {
        let taken: FxHashSet<&str> = self.names.iter().map(String::as_str).collect();
        (1..)
            .map(|i| format!("{} {}", self.prefix, i))
            .find(|candidate| !taken.contains(candidate.as_str()))
            .unwrap_or_default()
    }

    /// Next free generated name at or after `*next`, recorded in `taken`.
    fn claim_free(&self, taken: &mut FxHashSet<String>, next: &mut usize) -> String {
        loop {
            let candidate = format!("{} {}", self.prefix, *next);
            *next += 1;
            if taken.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    fn check_index(&self, index: usize) -> Result<(), GridError> {
        if index == 0 || index >= self.names.len() {
            return Err(GridError::InvalidHeaderIndex { axis: self.axis, index });
        }
        Ok(())
    }

    /// Insertion accepts one past the last slot (append).
    fn check_insert_index(&self, index: usize) -> Result<(), GridError> {
        if index == 0 || index > self.names.len() {
            return Err(GridError::InvalidHeaderIndex { axis: self.axis, index });
        }
        Ok(())
    }

    fn is_duplicate(&self, text: &str, index: usize) -> bool {
        self.names
            .iter()
            .enumerate()
            .any(|(i, name)| i != index && name == text)
    }

    fn set(&mut self, index: usize, text: &str) -> Result<&str, GridError> {
        self.check_index(index)?;
        let text = text.trim();
        let value = if text.is_empty() {
            self.generate_unique()
        } else if self.is_duplicate(text, index) {
            log::warn!("rejected duplicate {} header '{}' at {}", self.axis, text, index);
            return Err(GridError::DuplicateHeader {
                axis: self.axis,
                index,
                text: text.to_string(),
            });
        } else {
            text.to_string()
        };
        self.names[index] = value;
        Ok(&self.names[index])
    }

    fn insert_at(&mut self, index: usize) -> Result<&str, GridError> {
        self.check_insert_index(index)?;
        let name = self.generate_unique();
        self.names.insert(index, name);
        Ok(&self.names[index])
    }

    fn remove_at(&mut self, index: usize) -> Result<String, GridError> {
        self.check_index(index)?;
        let removed = self.names.remove(index);
        self.regenerate_duplicates();
        Ok(removed)
    }

    /// Give a fresh name to any slot that is blank or repeats an earlier slot.
    fn regenerate_duplicates(&mut self) {
        let mut taken: FxHashSet<String> = self.names.iter().cloned().collect();
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut next = 1;
        for index in 1..self.names.len() {
            let name = &self.names[index];
            if name.is_empty() || seen.contains(name) {
                let fresh = self.claim_free(&mut taken, &mut next);
                log::debug!("{} header {} renamed to '{}'", self.axis, index, fresh);
                self.names[index] = fresh.clone();
                seen.insert(fresh);
            } else {
                seen.insert(name.clone());
            }
        }
    }
}

/// Row and column header names, kept in step with the border store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRegistry {
    rows: HeaderList,
    cols: HeaderList,
}

impl HeaderRegistry {
    /// Headers for a `rows` x `cols` grid: `"Row 1".."Row R"`, `"Header 1".."Header C"`
    /// (with default naming).
    pub fn new(rows: usize, cols: usize, naming: &HeaderNaming) -> Self {
        Self {
            rows: HeaderList::new(Axis::Row, &naming.row_prefix, rows),
            cols: HeaderList::new(Axis::Column, &naming.column_prefix, cols),
        }
    }

    /// Restore persisted names, one per data line (the corner is not included).
    pub fn from_lists(
        row_names: Vec<String>,
        column_names: Vec<String>,
        naming: &HeaderNaming,
    ) -> Result<Self, GridError> {
        Ok(Self {
            rows: HeaderList::from_names(Axis::Row, &naming.row_prefix, row_names)?,
            cols: HeaderList::from_names(Axis::Column, &naming.column_prefix, column_names)?,
        })
    }

    fn list(&self, axis: Axis) -> &HeaderList {
        match axis {
            Axis::Row => &self.rows,
            Axis::Column => &self.cols,
        }
    }

    fn list_mut(&mut self, axis: Axis) -> &mut HeaderList {
        match axis {
            Axis::Row => &mut self.rows,
            Axis::Column => &mut self.cols,
        }
    }

    /// All names on an axis, including the empty corner at index 0.
    pub fn headers(&self, axis: Axis) -> &[String] {
        &self.list(axis).names
    }

    /// Names of the data lines only (index 0 excluded).
    pub fn data_headers(&self, axis: Axis) -> &[String] {
        &self.list(axis).names[1..]
    }

    /// Number of data lines labelled on an axis.
    pub fn count(&self, axis: Axis) -> usize {
        self.list(axis).names.len() - 1
    }

    pub fn header(&self, axis: Axis, index: usize) -> Option<&str> {
        self.list(axis).names.get(index).map(String::as_str)
    }

    pub fn generate_unique(&self, axis: Axis) -> String {
        self.list(axis).generate_unique()
    }

    /// Write a header. Empty text gets a generated name; a duplicate is rejected
    /// and the previous name kept. Returns the name actually stored.
    pub fn set(&mut self, axis: Axis, index: usize, text: &str) -> Result<&str, GridError> {
        self.list_mut(axis).set(index, text)
    }

    /// Insert a generated name at `index`, shifting later names along.
    pub fn insert_at(&mut self, axis: Axis, index: usize) -> Result<&str, GridError> {
        self.list_mut(axis).insert_at(index)
    }

    /// Remove the name at `index`, shifting later names back. Returns the removed name.
    pub fn remove_at(&mut self, axis: Axis, index: usize) -> Result<String, GridError> {
        self.list_mut(axis).remove_at(index)
    }

    /// Validate an `insert_at` without mutating anything.
    pub(crate) fn check_insertion(&self, axis: Axis, index: usize) -> Result<(), GridError> {
        self.list(axis).check_insert_index(index)
    }

    /// Validate a `remove_at` without mutating anything.
    pub(crate) fn check_removal(&self, axis: Axis, index: usize) -> Result<(), GridError> {
        self.list(axis).check_index(index)
    }

    // Per-axis shorthands

    pub fn row_headers(&self) -> &[String] {
        self.headers(Axis::Row)
    }

    pub fn column_headers(&self) -> &[String] {
        self.headers(Axis::Column)
    }

    pub fn row_header(&self, index: usize) -> Option<&str> {
        self.header(Axis::Row, index)
    }

    pub fn column_header(&self, index: usize) -> Option<&str> {
        self.header(Axis::Column, index)
    }

    pub fn generate_unique_row_header(&self) -> String {
        self.generate_unique(Axis::Row)
    }

    pub fn generate_unique_column_header(&self) -> String {
        self.generate_unique(Axis::Column)
    }

    pub fn set_row_header(&mut self, index: usize, text: &str) -> Result<&str, GridError> {
        self.set(Axis::Row, index, text)
    }

    pub fn set_column_header(&mut self, index: usize, text: &str) -> Result<&str, GridError> {
        self.set(Axis::Column, index, text)
    }

    pub fn insert_row_header_at(&mut self, index: usize) -> Result<&str, GridError> {
        self.insert_at(Axis::Row, index)
    }

    pub fn insert_column_header_at(&mut self, index: usize) -> Result<&str, GridError> {
        self.insert_at(Axis::Column, index)
    }

    pub fn remove_row_header_at(&mut self, index: usize) -> Result<String, GridError> {
        self.remove_at(Axis::Row, index)
    }

    pub fn remove_column_header_at(&mut self, index: usize) -> Result<String, GridError> {
        self.remove_at(Axis::Column, index)
    }
}
