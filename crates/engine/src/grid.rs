//! A border grid: border store plus header names, edited together.
//!
//! Every structural edit validates first and then mutates both components inside
//! one `&mut self` call, so no reader can observe a store that has been renumbered
//! while the headers have not.

use borderline_core::{Axis, Selection};

use crate::border::BorderSpec;
use crate::clipboard::BorderClipboard;
use crate::error::GridError;
use crate::headers::{HeaderNaming, HeaderRegistry};
use crate::store::BorderStore;

/// Parse user-entered row/column counts.
pub fn parse_dimensions(rows: &str, cols: &str) -> Result<(usize, usize), GridError> {
    let parse = |text: &str| -> Option<usize> {
        text.trim().parse::<usize>().ok().filter(|n| *n > 0)
    };
    match (parse(rows), parse(cols)) {
        (Some(r), Some(c)) => Ok((r, c)),
        _ => Err(GridError::InvalidDimensions(format!("{} x {}", rows.trim(), cols.trim()))),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderGrid {
    store: BorderStore,
    headers: HeaderRegistry,
    /// Rendered as a separator between grouped sections by the host.
    pub grouping_separator: bool,
}

impl BorderGrid {
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        Self::with_naming(rows, cols, &HeaderNaming::default())
    }

    pub fn with_naming(rows: usize, cols: usize, naming: &HeaderNaming) -> Result<Self, GridError> {
        let store = BorderStore::new(rows, cols)?;
        log::debug!("created {rows}x{cols} border grid");
        Ok(Self {
            store,
            headers: HeaderRegistry::new(rows, cols, naming),
            grouping_separator: false,
        })
    }

    /// Assemble a grid from restored parts. Header counts must match the store.
    pub fn from_parts(store: BorderStore, headers: HeaderRegistry) -> Result<Self, GridError> {
        for (axis, expected) in [(Axis::Row, store.rows()), (Axis::Column, store.cols())] {
            let found = headers.count(axis);
            if found != expected {
                return Err(GridError::MismatchedHeaders { axis, expected, found });
            }
        }
        Ok(Self {
            store,
            headers,
            grouping_separator: false,
        })
    }

    pub fn rows(&self) -> usize {
        self.store.rows()
    }

    pub fn cols(&self) -> usize {
        self.store.cols()
    }

    pub fn store(&self) -> &BorderStore {
        &self.store
    }

    /// Mutable access for border edits only; structural edits go through the grid.
    pub fn store_mut(&mut self) -> BordersMut<'_> {
        BordersMut { store: &mut self.store }
    }

    pub fn headers(&self) -> &HeaderRegistry {
        &self.headers
    }

    /// Border of a data cell.
    pub fn border(&self, row: usize, col: usize) -> BorderSpec {
        self.store.get(row, col)
    }

    pub fn set_border(&mut self, row: usize, col: usize, spec: BorderSpec) -> Result<(), GridError> {
        self.store.set(row, col, spec)
    }

    /// Apply one spec to every selected cell ("Edit Borders").
    pub fn edit_selection(&mut self, selection: &Selection, spec: BorderSpec) -> Result<usize, GridError> {
        if selection.is_empty() {
            return Err(GridError::EmptySelection);
        }
        Ok(self.store.apply(selection, spec))
    }

    /// Snapshot a selection of this grid into the clipboard.
    pub fn copy_into(&self, clipboard: &mut BorderClipboard, selection: &Selection) -> Result<usize, GridError> {
        clipboard.copy(selection, &self.store)
    }

    /// Paste the clipboard onto a selection of this grid.
    pub fn paste_from(&mut self, clipboard: &BorderClipboard, target: &Selection) -> Result<usize, GridError> {
        clipboard.paste(target, &mut self.store)
    }

    /// Remove every border, keeping size and headers.
    pub fn clear_borders(&mut self) {
        self.store.clear();
    }

    /// Header of data row `row`.
    pub fn row_name(&self, row: usize) -> Option<&str> {
        self.headers.row_header(row + 1)
    }

    /// Header of data column `col`.
    pub fn column_name(&self, col: usize) -> Option<&str> {
        self.headers.column_header(col + 1)
    }

    pub fn rename_row(&mut self, row: usize, text: &str) -> Result<&str, GridError> {
        self.headers.set_row_header(row + 1, text)
    }

    pub fn rename_column(&mut self, col: usize, text: &str) -> Result<&str, GridError> {
        self.headers.set_column_header(col + 1, text)
    }

    // -------------------------------------------------------------------------
    // Structural edits
    // -------------------------------------------------------------------------

    /// Insert a row after `after`, or after the last row when `None`.
    /// Returns the data index of the new row.
    pub fn insert_row_after(&mut self, after: Option<usize>) -> Result<usize, GridError> {
        self.insert_after(Axis::Row, after)
    }

    /// Insert a column after `after`, or after the last column when `None`.
    /// Returns the data index of the new column.
    pub fn insert_column_after(&mut self, after: Option<usize>) -> Result<usize, GridError> {
        self.insert_after(Axis::Column, after)
    }

    /// Insert a row at `at`, shifting rows `>= at` down.
    pub fn insert_row_at(&mut self, at: usize) -> Result<(), GridError> {
        self.insert_at(Axis::Row, at)
    }

    /// Insert a column at `at`, shifting columns `>= at` right.
    pub fn insert_column_at(&mut self, at: usize) -> Result<(), GridError> {
        self.insert_at(Axis::Column, at)
    }

    pub fn remove_row(&mut self, index: usize) -> Result<(), GridError> {
        self.remove(Axis::Row, index)
    }

    pub fn remove_column(&mut self, index: usize) -> Result<(), GridError> {
        self.remove(Axis::Column, index)
    }

    fn len(&self, axis: Axis) -> usize {
        match axis {
            Axis::Row => self.store.rows(),
            Axis::Column => self.store.cols(),
        }
    }

    fn insert_after(&mut self, axis: Axis, after: Option<usize>) -> Result<usize, GridError> {
        let len = self.len(axis);
        let at = match after {
            Some(index) if index >= len => {
                return Err(match axis {
                    Axis::Row => GridError::OutOfBounds { row: index, col: 0 },
                    Axis::Column => GridError::OutOfBounds { row: 0, col: index },
                });
            }
            Some(index) => index + 1,
            None => len,
        };
        self.insert_at(axis, at)?;
        Ok(at)
    }

    fn insert_at(&mut self, axis: Axis, at: usize) -> Result<(), GridError> {
        // Headers are band-indexed: data line `at` is header slot `at + 1`
        self.store.check_insertion(axis, at)?;
        self.headers.check_insertion(axis, at + 1)?;
        match axis {
            Axis::Row => self.store.insert_row_at(at)?,
            Axis::Column => self.store.insert_column_at(at)?,
        }
        let name = self.headers.insert_at(axis, at + 1)?.to_string();
        log::debug!("{axis} {at} inserted as '{name}'");
        Ok(())
    }

    fn remove(&mut self, axis: Axis, index: usize) -> Result<(), GridError> {
        let checked = self
            .store
            .check_removal(axis, index)
            .and_then(|()| self.headers.check_removal(axis, index + 1));
        if let Err(err) = checked {
            log::warn!("refused to remove {axis} {index}: {err}");
            return Err(err);
        }
        match axis {
            Axis::Row => self.store.remove_row(index)?,
            Axis::Column => self.store.remove_column(index)?,
        }
        let name = self.headers.remove_at(axis, index + 1)?;
        log::debug!("{axis} {index} ('{name}') removed");
        Ok(())
    }
}

/// Border-only mutable view of a grid's store.
pub struct BordersMut<'a> {
    store: &'a mut BorderStore,
}

impl BordersMut<'_> {
    pub fn set(&mut self, row: usize, col: usize, spec: BorderSpec) -> Result<(), GridError> {
        self.store.set(row, col, spec)
    }

    pub fn apply(&mut self, selection: &Selection, spec: BorderSpec) -> usize {
        self.store.apply(selection, spec)
    }

    pub fn clear(&mut self) {
        self.store.clear();
    }
}
