//! One editing session: the current grid (if a table has been created) and the
//! border clipboard. The clipboard outlives grid edits and resizes; only
//! [`EditorSession::reset`] clears it.

use borderline_core::Selection;

use crate::border::BorderSpec;
use crate::clipboard::BorderClipboard;
use crate::error::GridError;
use crate::grid::{parse_dimensions, BorderGrid};
use crate::headers::HeaderNaming;

#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    grid: Option<BorderGrid>,
    clipboard: BorderClipboard,
    naming: HeaderNaming,
    grouping_separator: bool,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_naming(naming: HeaderNaming) -> Self {
        Self {
            naming,
            ..Self::default()
        }
    }

    /// Separator flag given to every table created from now on.
    pub fn with_grouping_separator(mut self, enabled: bool) -> Self {
        self.grouping_separator = enabled;
        self
    }

    pub fn naming(&self) -> &HeaderNaming {
        &self.naming
    }

    pub fn grid(&self) -> Option<&BorderGrid> {
        self.grid.as_ref()
    }

    pub fn grid_mut(&mut self) -> Option<&mut BorderGrid> {
        self.grid.as_mut()
    }

    pub fn clipboard(&self) -> &BorderClipboard {
        &self.clipboard
    }

    /// Create a table from user-entered counts. On bad input the current grid is kept.
    pub fn create_table(&mut self, rows: &str, cols: &str) -> Result<&mut BorderGrid, GridError> {
        let (rows, cols) = parse_dimensions(rows, cols).map_err(|err| {
            log::warn!("create table rejected: {err}");
            err
        })?;
        self.create_table_with(rows, cols)
    }

    /// Replace the current grid with a fresh `rows` x `cols` one.
    pub fn create_table_with(&mut self, rows: usize, cols: usize) -> Result<&mut BorderGrid, GridError> {
        let mut grid = BorderGrid::with_naming(rows, cols, &self.naming)?;
        grid.grouping_separator = self.grouping_separator;
        Ok(self.grid.insert(grid))
    }

    /// Install a grid restored from persisted data.
    pub fn load_grid(&mut self, grid: BorderGrid) -> &mut BorderGrid {
        log::debug!("loaded {}x{} grid", grid.rows(), grid.cols());
        self.grid.insert(grid)
    }

    /// Drop the grid and the clipboard.
    pub fn reset(&mut self) {
        self.grid = None;
        self.clipboard.clear();
        log::debug!("session reset");
    }

    /// Remove every border from the current grid. No-op without a grid.
    pub fn clean_borders(&mut self) {
        if let Some(grid) = self.grid.as_mut() {
            grid.clear_borders();
        }
    }

    pub fn edit_borders(&mut self, selection: &Selection, spec: BorderSpec) -> Result<usize, GridError> {
        self.current_grid_mut()?.edit_selection(selection, spec)
    }

    /// Copy the selected borders. Returns the number of cells copied.
    pub fn copy(&mut self, selection: &Selection) -> Result<usize, GridError> {
        let grid = self.grid.as_ref().ok_or(GridError::NoTable)?;
        grid.copy_into(&mut self.clipboard, selection)
    }

    /// Paste onto the selection. Returns the number of cells written.
    pub fn paste(&mut self, selection: &Selection) -> Result<usize, GridError> {
        if self.clipboard.is_empty() {
            return Err(GridError::EmptyClipboard);
        }
        let grid = self.grid.as_mut().ok_or(GridError::NoTable)?;
        grid.paste_from(&self.clipboard, selection)
    }

    fn current_grid_mut(&mut self) -> Result<&mut BorderGrid, GridError> {
        self.grid.as_mut().ok_or(GridError::NoTable)
    }
}
