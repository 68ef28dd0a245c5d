//! Copy/paste of border patterns by relative position.
//!
//! A copy records every selected cell relative to the selection origin (minimum
//! row, minimum column). Gaps in the source selection collapse: rows `{1, 3}`
//! become offsets `{0, 2}`, and on paste only offsets that land on a selected
//! target row AND a selected target column are written.

use rustc_hash::FxHashMap;

use borderline_core::Selection;

use crate::border::BorderSpec;
use crate::error::GridError;
use crate::store::BorderStore;

/// A copied block of borders keyed by offset from its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedBorders {
    origin: (usize, usize),
    entries: FxHashMap<(usize, usize), BorderSpec>,
}

impl CopiedBorders {
    /// Top-left corner of the source selection.
    pub fn origin(&self) -> (usize, usize) {
        self.origin
    }

    /// Number of copied cells (including cells with no border).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Spec copied at a relative offset.
    pub fn get(&self, dr: usize, dc: usize) -> Option<BorderSpec> {
        self.entries.get(&(dr, dc)).copied()
    }
}

/// Clipboard for border patterns. Lives independently of any grid.
#[derive(Debug, Clone, Default)]
pub struct BorderClipboard {
    contents: Option<CopiedBorders>,
}

impl BorderClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&CopiedBorders> {
        self.contents.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_none()
    }

    pub fn clear(&mut self) {
        self.contents = None;
    }

    /// Snapshot the selection, replacing anything copied before.
    /// Returns the number of cells copied.
    pub fn copy(&mut self, selection: &Selection, store: &BorderStore) -> Result<usize, GridError> {
        let (min_row, min_col) = selection.origin().ok_or(GridError::EmptySelection)?;

        let entries: FxHashMap<_, _> = selection
            .cells()
            .map(|(r, c)| ((r - min_row, c - min_col), store.get(r, c)))
            .collect();

        let count = entries.len();
        log::debug!("copied {count} cell borders from origin ({min_row}, {min_col})");
        self.contents = Some(CopiedBorders {
            origin: (min_row, min_col),
            entries,
        });
        Ok(count)
    }

    /// Replay the copied block at the target selection's origin.
    ///
    /// Cells falling outside the grid, or on a row/column that is not part of
    /// the target selection, are skipped. Returns the number of cells written.
    pub fn paste(&self, target: &Selection, store: &mut BorderStore) -> Result<usize, GridError> {
        let copied = self.contents.as_ref().ok_or(GridError::EmptyClipboard)?;
        let (origin_row, origin_col) = target.origin().ok_or(GridError::EmptySelection)?;

        let mut pasted = 0;
        for (&(dr, dc), &spec) in &copied.entries {
            let (row, col) = (origin_row + dr, origin_col + dc);
            if !target.contains(row, col) {
                continue;
            }
            match store.set(row, col, spec) {
                Ok(()) => pasted += 1,
                Err(err) => log::trace!("paste skipped: {err}"),
            }
        }

        log::debug!("pasted {pasted} of {} cell borders at ({origin_row}, {origin_col})", copied.len());
        Ok(pasted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(n: usize) -> BorderSpec {
        BorderSpec::new(n & 1 != 0, n & 2 != 0, n & 4 != 0, n & 8 != 0)
    }

    #[test]
    fn test_paste_before_copy() {
        let clipboard = BorderClipboard::new();
        let mut store = BorderStore::new(3, 3).unwrap();
        assert_eq!(
            clipboard.paste(&Selection::single(0, 0), &mut store),
            Err(GridError::EmptyClipboard)
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_copy_empty_selection() {
        let mut clipboard = BorderClipboard::new();
        let store = BorderStore::new(3, 3).unwrap();
        assert_eq!(clipboard.copy(&Selection::default(), &store), Err(GridError::EmptySelection));
        assert!(clipboard.is_empty());
    }

    #[test]
    fn test_copy_records_relative_offsets() {
        let mut store = BorderStore::new(6, 6).unwrap();
        store.set(1, 2, spec(1)).unwrap();
        store.set(3, 4, spec(2)).unwrap();

        let mut clipboard = BorderClipboard::new();
        let count = clipboard.copy(&Selection::new([1, 3], [2, 4]), &store).unwrap();
        assert_eq!(count, 4);

        let copied = clipboard.contents().unwrap();
        assert_eq!(copied.origin(), (1, 2));
        assert_eq!(copied.get(0, 0), Some(spec(1)));
        assert_eq!(copied.get(2, 2), Some(spec(2)));
        assert_eq!(copied.get(0, 2), Some(BorderSpec::NONE));
        assert_eq!(copied.get(1, 1), None);
    }

    #[test]
    fn test_copy_replaces_previous() {
        let store = BorderStore::new(4, 4).unwrap();
        let mut clipboard = BorderClipboard::new();
        clipboard.copy(&Selection::new(0..3, 0..3), &store).unwrap();
        clipboard.copy(&Selection::single(2, 2), &store).unwrap();
        assert_eq!(clipboard.contents().map(CopiedBorders::len), Some(1));
    }

    #[test]
    fn test_paste_contiguous_block() {
        let mut store = BorderStore::new(6, 6).unwrap();
        for r in 0..2 {
            for c in 0..2 {
                store.set(r, c, spec(r * 2 + c + 1)).unwrap();
            }
        }
        let mut clipboard = BorderClipboard::new();
        clipboard.copy(&Selection::new(0..2, 0..2), &store).unwrap();

        let pasted = clipboard.paste(&Selection::new(3..5, 2..4), &mut store).unwrap();
        assert_eq!(pasted, 4);
        assert_eq!(store.get(3, 2), spec(1));
        assert_eq!(store.get(3, 3), spec(2));
        assert_eq!(store.get(4, 2), spec(3));
        assert_eq!(store.get(4, 3), spec(4));
    }

    #[test]
    fn test_paste_clips_to_grid() {
        let mut store = BorderStore::new(4, 4).unwrap();
        store.apply(&Selection::new(0..3, 0..3), BorderSpec::ALL);
        let mut clipboard = BorderClipboard::new();
        clipboard.copy(&Selection::new(0..3, 0..3), &store).unwrap();

        let mut target = BorderStore::new(4, 4).unwrap();
        // Only rows 2 and 3 exist below the origin
        let pasted = clipboard
            .paste(&Selection::new(2..6, 0..3), &mut target)
            .unwrap();
        assert_eq!(pasted, 6);
        assert_eq!(target.len(), 6);
    }

    #[test]
    fn test_paste_only_into_selected_lines() {
        let mut store = BorderStore::new(8, 8).unwrap();
        store.apply(&Selection::new(0..2, 0..2), BorderSpec::ALL);
        let mut clipboard = BorderClipboard::new();
        clipboard.copy(&Selection::new(0..2, 0..2), &store).unwrap();

        // Row 5 is not selected, so offset row 1 has nowhere to land
        let pasted = clipboard.paste(&Selection::new([4, 6], [4, 5]), &mut store).unwrap();
        assert_eq!(pasted, 2);
        assert_eq!(store.get(4, 4), BorderSpec::ALL);
        assert_eq!(store.get(5, 4), BorderSpec::NONE);
    }

    #[test]
    fn test_paste_is_repeatable() {
        let mut store = BorderStore::new(5, 5).unwrap();
        store.set(0, 0, spec(5)).unwrap();
        let mut clipboard = BorderClipboard::new();
        clipboard.copy(&Selection::single(0, 0), &store).unwrap();

        assert_eq!(clipboard.paste(&Selection::single(2, 2), &mut store), Ok(1));
        assert_eq!(clipboard.paste(&Selection::single(4, 4), &mut store), Ok(1));
        assert_eq!(store.get(2, 2), spec(5));
        assert_eq!(store.get(4, 4), spec(5));
    }

    #[test]
    fn test_paste_overwrites_with_empty() {
        let mut store = BorderStore::new(3, 3).unwrap();
        let mut clipboard = BorderClipboard::new();
        clipboard.copy(&Selection::single(0, 0), &store).unwrap();

        store.set(2, 2, BorderSpec::ALL).unwrap();
        clipboard.paste(&Selection::single(2, 2), &mut store).unwrap();
        assert_eq!(store.get(2, 2), BorderSpec::NONE);
    }
}
