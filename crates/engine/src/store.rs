//! Sparse border storage.
//!
//! Key invariants:
//! - Every key satisfies `row < rows` and `col < cols`
//! - Only non-empty specs are stored; absence means "no border"
//! - Structural edits rebuild the whole map before swapping it in, so a key is
//!   never shifted into a slot that still holds an unshifted entry

use rustc_hash::FxHashMap;

use borderline_core::{Axis, Selection};

use crate::border::BorderSpec;
use crate::error::GridError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorderStore {
    borders: FxHashMap<(usize, usize), BorderSpec>,
    rows: usize,
    cols: usize,
}

impl BorderStore {
    /// Create an empty store for a `rows` x `cols` data grid.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        if rows == 0 || cols == 0 {
            return Err(GridError::InvalidDimensions(format!("{rows}x{cols}")));
        }
        Ok(Self {
            borders: FxHashMap::default(),
            rows,
            cols,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of stored (non-empty) specs.
    pub fn len(&self) -> usize {
        self.borders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.borders.is_empty()
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Border at a cell. Absent and out-of-range cells have no border.
    pub fn get(&self, row: usize, col: usize) -> BorderSpec {
        self.borders.get(&(row, col)).copied().unwrap_or_default()
    }

    pub fn set(&mut self, row: usize, col: usize, spec: BorderSpec) -> Result<(), GridError> {
        if !self.in_bounds(row, col) {
            return Err(GridError::OutOfBounds { row, col });
        }
        if spec.is_empty() {
            self.borders.remove(&(row, col));
        } else {
            self.borders.insert((row, col), spec);
        }
        Ok(())
    }

    /// Drop every border ("Clean Borders"). Dimensions are kept.
    pub fn clear(&mut self) {
        self.borders.clear();
    }

    /// Stored entries sorted by (row, col).
    pub fn entries(&self) -> Vec<((usize, usize), BorderSpec)> {
        let mut entries: Vec<_> = self.borders.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort_unstable_by_key(|(k, _)| *k);
        entries
    }

    /// Write one spec to every in-bounds selected cell. Returns the number of cells written.
    pub fn apply(&mut self, selection: &Selection, spec: BorderSpec) -> usize {
        let targets: Vec<_> = selection
            .cells()
            .filter(|&(r, c)| self.in_bounds(r, c))
            .collect();
        for &(row, col) in &targets {
            if spec.is_empty() {
                self.borders.remove(&(row, col));
            } else {
                self.borders.insert((row, col), spec);
            }
        }
        targets.len()
    }

    /// The spec of the selection's first cell, used to pre-fill an edit.
    pub fn spec_at_origin(&self, selection: &Selection) -> BorderSpec {
        selection
            .origin()
            .map(|(row, col)| self.get(row, col))
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Structural edits
    // -------------------------------------------------------------------------

    /// Open a new empty row directly after `after_index`.
    pub fn insert_row(&mut self, after_index: usize) -> Result<(), GridError> {
        if after_index >= self.rows {
            return Err(GridError::OutOfBounds { row: after_index, col: 0 });
        }
        self.insert_row_at(after_index + 1)
    }

    /// Open a new empty row at `at`, shifting rows `>= at` down. `at == rows` appends.
    pub fn insert_row_at(&mut self, at: usize) -> Result<(), GridError> {
        self.check_insertion(Axis::Row, at)?;
        self.remap(|(r, c)| Some(if r >= at { (r + 1, c) } else { (r, c) }));
        self.rows += 1;
        log::debug!(
            "inserted row at {at}, grid now {}x{} with {} bordered cells",
            self.rows,
            self.cols,
            self.borders.len()
        );
        Ok(())
    }

    /// Delete row `index`, dropping its borders and shifting later rows up.
    pub fn remove_row(&mut self, index: usize) -> Result<(), GridError> {
        self.check_removal(Axis::Row, index)?;
        self.remap(|(r, c)| match r {
            r if r < index => Some((r, c)),
            r if r > index => Some((r - 1, c)),
            _ => None,
        });
        self.rows -= 1;
        log::debug!(
            "removed row {index}, grid now {}x{} with {} bordered cells",
            self.rows,
            self.cols,
            self.borders.len()
        );
        Ok(())
    }

    /// Open a new empty column directly after `after_index`.
    pub fn insert_column(&mut self, after_index: usize) -> Result<(), GridError> {
        if after_index >= self.cols {
            return Err(GridError::OutOfBounds { row: 0, col: after_index });
        }
        self.insert_column_at(after_index + 1)
    }

    /// Open a new empty column at `at`, shifting columns `>= at` right. `at == cols` appends.
    pub fn insert_column_at(&mut self, at: usize) -> Result<(), GridError> {
        self.check_insertion(Axis::Column, at)?;
        self.remap(|(r, c)| Some(if c >= at { (r, c + 1) } else { (r, c) }));
        self.cols += 1;
        log::debug!(
            "inserted column at {at}, grid now {}x{} with {} bordered cells",
            self.rows,
            self.cols,
            self.borders.len()
        );
        Ok(())
    }

    /// Delete column `index`, dropping its borders and shifting later columns left.
    pub fn remove_column(&mut self, index: usize) -> Result<(), GridError> {
        self.check_removal(Axis::Column, index)?;
        self.remap(|(r, c)| match c {
            c if c < index => Some((r, c)),
            c if c > index => Some((r, c - 1)),
            _ => None,
        });
        self.cols -= 1;
        log::debug!(
            "removed column {index}, grid now {}x{} with {} bordered cells",
            self.rows,
            self.cols,
            self.borders.len()
        );
        Ok(())
    }

    /// Validate an insertion position (`at == len` appends) without mutating anything.
    pub(crate) fn check_insertion(&self, axis: Axis, at: usize) -> Result<(), GridError> {
        let (len, oob) = match axis {
            Axis::Row => (self.rows, GridError::OutOfBounds { row: at, col: 0 }),
            Axis::Column => (self.cols, GridError::OutOfBounds { row: 0, col: at }),
        };
        if at > len {
            return Err(oob);
        }
        Ok(())
    }

    /// Validate a removal without mutating anything.
    pub(crate) fn check_removal(&self, axis: Axis, index: usize) -> Result<(), GridError> {
        let (len, oob) = match axis {
            Axis::Row => (self.rows, GridError::OutOfBounds { row: index, col: 0 }),
            Axis::Column => (self.cols, GridError::OutOfBounds { row: 0, col: index }),
        };
        if index >= len {
            return Err(oob);
        }
        if len <= 1 {
            return Err(GridError::MinimumSizeViolation { axis });
        }
        Ok(())
    }

    /// Rebuild the map through `f`, replacing it in one step. `None` drops the entry.
    fn remap<F>(&mut self, f: F)
    where
        F: Fn((usize, usize)) -> Option<(usize, usize)>,
    {
        let remapped: FxHashMap<_, _> = self
            .borders
            .iter()
            .filter_map(|(&key, &spec)| f(key).map(|new_key| (new_key, spec)))
            .collect();
        self.borders = remapped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOP: BorderSpec = BorderSpec::new(true, false, false, false);
    const BOX: BorderSpec = BorderSpec::ALL;

    fn rows_of(store: &BorderStore) -> Vec<usize> {
        store.entries().iter().map(|((r, _), _)| *r).collect()
    }

    fn store_with_rows(rows: &[usize]) -> BorderStore {
        let mut store = BorderStore::new(6, 3).unwrap();
        for &r in rows {
            store.set(r, 1, BorderSpec::new(true, r % 2 == 0, false, true)).unwrap();
        }
        store
    }

    #[test]
    fn test_get_absent_is_empty() {
        let store = BorderStore::new(3, 3).unwrap();
        assert_eq!(store.get(1, 1), BorderSpec::NONE);
        assert_eq!(store.get(99, 99), BorderSpec::NONE);
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert!(matches!(BorderStore::new(0, 3), Err(GridError::InvalidDimensions(_))));
        assert!(matches!(BorderStore::new(3, 0), Err(GridError::InvalidDimensions(_))));
    }

    #[test]
    fn test_set_empty_removes_entry() {
        let mut store = BorderStore::new(3, 3).unwrap();
        store.set(0, 0, BOX).unwrap();
        assert_eq!(store.len(), 1);
        store.set(0, 0, BorderSpec::NONE).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.get(0, 0), BorderSpec::NONE);
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut store = BorderStore::new(2, 2).unwrap();
        assert_eq!(store.set(2, 0, BOX), Err(GridError::OutOfBounds { row: 2, col: 0 }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_insert_row_after_renumbers() {
        let mut store = store_with_rows(&[0, 2, 5]);
        store.insert_row(2).unwrap();
        assert_eq!(rows_of(&store), vec![0, 2, 6]);
        assert_eq!(store.rows(), 7);
        // The new row starts empty
        assert_eq!(store.get(3, 1), BorderSpec::NONE);
    }

    #[test]
    fn test_insert_row_at_renumbers() {
        let mut store = store_with_rows(&[0, 2, 5]);
        store.insert_row_at(2).unwrap();
        assert_eq!(rows_of(&store), vec![0, 3, 6]);
        assert_eq!(store.get(2, 1), BorderSpec::NONE);
    }

    #[test]
    fn test_insert_row_at_end_appends() {
        let mut store = store_with_rows(&[5]);
        store.insert_row_at(6).unwrap();
        assert_eq!(rows_of(&store), vec![5]);
        assert_eq!(store.rows(), 7);
        assert!(store.insert_row_at(8).is_err());
    }

    #[test]
    fn test_insert_row_keeps_specs() {
        let original = store_with_rows(&[0, 2, 5]);
        let mut store = original.clone();
        store.insert_row(2).unwrap();
        assert_eq!(store.get(0, 1), original.get(0, 1));
        assert_eq!(store.get(2, 1), original.get(2, 1));
        assert_eq!(store.get(6, 1), original.get(5, 1));
        assert_eq!(store.len(), original.len());
    }

    #[test]
    fn test_remove_row_drops_and_shifts() {
        let original = store_with_rows(&[0, 2, 5]);
        let mut store = original.clone();
        store.remove_row(2).unwrap();
        assert_eq!(rows_of(&store), vec![0, 4]);
        assert_eq!(store.get(4, 1), original.get(5, 1));
        assert_eq!(store.rows(), 5);
    }

    #[test]
    fn test_insert_then_remove_is_identity() {
        let original = store_with_rows(&[0, 1, 2, 3, 4, 5]);
        let mut store = original.clone();
        store.insert_row(3).unwrap();
        store.remove_row(4).unwrap();
        assert_eq!(store, original);
    }

    #[test]
    fn test_dense_shift_has_no_overwrites() {
        // Every row occupied: a naive in-place shift would clobber neighbours
        let mut store = BorderStore::new(4, 1).unwrap();
        let specs = [
            BorderSpec::new(true, false, false, false),
            BorderSpec::new(false, true, false, false),
            BorderSpec::new(false, false, true, false),
            BorderSpec::new(false, false, false, true),
        ];
        for (r, spec) in specs.iter().enumerate() {
            store.set(r, 0, *spec).unwrap();
        }
        store.insert_row_at(0).unwrap();
        for (r, spec) in specs.iter().enumerate() {
            assert_eq!(store.get(r + 1, 0), *spec);
        }
        assert_eq!(store.get(0, 0), BorderSpec::NONE);
    }

    #[test]
    fn test_column_edits_mirror_rows() {
        let mut store = BorderStore::new(2, 4).unwrap();
        store.set(1, 0, TOP).unwrap();
        store.set(1, 2, BOX).unwrap();
        store.set(1, 3, TOP).unwrap();

        store.insert_column(0).unwrap();
        assert_eq!(store.cols(), 5);
        assert_eq!(store.get(1, 0), TOP);
        assert_eq!(store.get(1, 1), BorderSpec::NONE);
        assert_eq!(store.get(1, 3), BOX);
        assert_eq!(store.get(1, 4), TOP);

        store.remove_column(3).unwrap();
        assert_eq!(store.cols(), 4);
        assert_eq!(store.get(1, 3), TOP);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_remove_last_row_refused() {
        let mut store = BorderStore::new(1, 2).unwrap();
        store.set(0, 1, BOX).unwrap();
        assert_eq!(
            store.remove_row(0),
            Err(GridError::MinimumSizeViolation { axis: Axis::Row })
        );
        assert_eq!(store.rows(), 1);
        assert_eq!(store.get(0, 1), BOX);
    }

    #[test]
    fn test_remove_last_column_refused() {
        let mut store = BorderStore::new(2, 1).unwrap();
        assert_eq!(
            store.remove_column(0),
            Err(GridError::MinimumSizeViolation { axis: Axis::Column })
        );
    }

    #[test]
    fn test_structural_index_out_of_range() {
        let mut store = BorderStore::new(3, 3).unwrap();
        assert!(matches!(store.insert_row(3), Err(GridError::OutOfBounds { .. })));
        assert!(matches!(store.remove_column(7), Err(GridError::OutOfBounds { .. })));
        assert_eq!((store.rows(), store.cols()), (3, 3));
    }

    #[test]
    fn test_apply_writes_cross_product() {
        let mut store = BorderStore::new(4, 4).unwrap();
        let written = store.apply(&Selection::new([0, 2], [1, 3, 9]), BOX);
        assert_eq!(written, 4);
        assert_eq!(store.get(2, 3), BOX);
        assert_eq!(store.get(1, 1), BorderSpec::NONE);

        // Applying the empty spec erases
        store.apply(&Selection::single(2, 3), BorderSpec::NONE);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_spec_at_origin() {
        let mut store = BorderStore::new(4, 4).unwrap();
        store.set(1, 2, TOP).unwrap();
        assert_eq!(store.spec_at_origin(&Selection::new([3, 1], [2, 3])), TOP);
        assert_eq!(store.spec_at_origin(&Selection::default()), BorderSpec::NONE);
    }
}
