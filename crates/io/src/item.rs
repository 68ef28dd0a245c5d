// Structured border item (JSON)

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use borderline_core::Axis;
use borderline_engine::{BorderGrid, BorderSpec, BorderStore, HeaderNaming, HeaderRegistry};

use crate::FormatError;

/// Border of one cell, flattened for serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorderEntry {
    pub row: usize,
    pub col: usize,
    #[serde(default)]
    pub top: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub bottom: bool,
    #[serde(default)]
    pub left: bool,
}

impl BorderEntry {
    pub fn spec(&self) -> BorderSpec {
        BorderSpec::new(self.top, self.right, self.bottom, self.left)
    }
}

/// A named grid in host-item form: size, borders and header names.
///
/// Header lists hold one name per data line. An empty list means "generate".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorderItem {
    pub name: String,
    pub row_count: usize,
    pub column_count: usize,
    #[serde(default)]
    pub cell_borders: Vec<BorderEntry>,
    #[serde(default)]
    pub row_headers: Vec<String>,
    #[serde(default)]
    pub column_headers: Vec<String>,
    #[serde(default)]
    pub grouping_separator: bool,
}

impl BorderItem {
    pub fn from_grid(name: &str, grid: &BorderGrid) -> Self {
        let cell_borders = grid
            .store()
            .entries()
            .into_iter()
            .map(|((row, col), spec)| BorderEntry {
                row,
                col,
                top: spec.top,
                right: spec.right,
                bottom: spec.bottom,
                left: spec.left,
            })
            .collect();

        Self {
            name: name.to_string(),
            row_count: grid.rows(),
            column_count: grid.cols(),
            cell_borders,
            row_headers: grid.headers().data_headers(Axis::Row).to_vec(),
            column_headers: grid.headers().data_headers(Axis::Column).to_vec(),
            grouping_separator: grid.grouping_separator,
        }
    }

    /// Rebuild the grid. Blank header names are generated with `naming`.
    pub fn into_grid(self, naming: &HeaderNaming) -> Result<BorderGrid, FormatError> {
        let mut store = BorderStore::new(self.row_count, self.column_count)?;
        for entry in &self.cell_borders {
            store.set(entry.row, entry.col, entry.spec())?;
        }

        let row_headers = or_blank(self.row_headers, self.row_count);
        let column_headers = or_blank(self.column_headers, self.column_count);
        let headers = HeaderRegistry::from_lists(row_headers, column_headers, naming)?;

        let mut grid = BorderGrid::from_parts(store, headers)?;
        grid.grouping_separator = self.grouping_separator;
        log::debug!(
            "restored item '{}' ({}x{}, {} bordered cells)",
            self.name,
            grid.rows(),
            grid.cols(),
            grid.store().len()
        );
        Ok(grid)
    }

    pub fn to_json(&self) -> Result<String, FormatError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, FormatError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn export(&self, path: &Path) -> Result<(), FormatError> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn import(path: &Path) -> Result<Self, FormatError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

fn or_blank(names: Vec<String>, count: usize) -> Vec<String> {
    if names.is_empty() {
        vec![String::new(); count]
    } else {
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use borderline_engine::GridError;
    use tempfile::tempdir;

    fn sample_grid() -> BorderGrid {
        let mut grid = BorderGrid::new(3, 2).unwrap();
        grid.set_border(0, 0, BorderSpec::ALL).unwrap();
        grid.set_border(2, 1, BorderSpec::new(false, false, true, false)).unwrap();
        grid.rename_row(1, "Subtotal").unwrap();
        grid.rename_column(0, "Amount").unwrap();
        grid.grouping_separator = true;
        grid
    }

    #[test]
    fn test_from_grid() {
        let item = BorderItem::from_grid("Invoice", &sample_grid());
        assert_eq!(item.name, "Invoice");
        assert_eq!((item.row_count, item.column_count), (3, 2));
        assert_eq!(item.cell_borders.len(), 2);
        assert_eq!(item.cell_borders[0], BorderEntry {
            row: 0,
            col: 0,
            top: true,
            right: true,
            bottom: true,
            left: true,
        });
        assert_eq!(item.row_headers, vec!["Row 1", "Subtotal", "Row 3"]);
        assert_eq!(item.column_headers, vec!["Amount", "Header 2"]);
        assert!(item.grouping_separator);
    }

    #[test]
    fn test_json_round_trip() {
        let grid = sample_grid();
        let json = BorderItem::from_grid("Invoice", &grid).to_json().unwrap();
        let restored = BorderItem::from_json(&json)
            .unwrap()
            .into_grid(&HeaderNaming::default())
            .unwrap();
        assert_eq!(restored, grid);
    }

    #[test]
    fn test_missing_fields_default() {
        let json = r#"{
            "name": "Bare",
            "row_count": 2,
            "column_count": 2,
            "cell_borders": [{ "row": 1, "col": 0, "left": true }]
        }"#;
        let grid = BorderItem::from_json(json).unwrap().into_grid(&HeaderNaming::default()).unwrap();
        assert_eq!(grid.border(1, 0), BorderSpec::new(false, false, false, true));
        assert_eq!(grid.row_name(1), Some("Row 2"));
        assert_eq!(grid.column_name(0), Some("Header 1"));
        assert!(!grid.grouping_separator);
    }

    #[test]
    fn test_blank_header_is_generated() {
        let mut item = BorderItem::from_grid("t", &BorderGrid::new(2, 1).unwrap());
        item.row_headers = vec!["Row 2".into(), " ".into()];
        let grid = item.into_grid(&HeaderNaming::default()).unwrap();
        assert_eq!(grid.row_name(0), Some("Row 2"));
        assert_eq!(grid.row_name(1), Some("Row 1"));
    }

    #[test]
    fn test_invalid_items_rejected() {
        let base = BorderItem::from_grid("t", &BorderGrid::new(2, 2).unwrap());

        let mut item = base.clone();
        item.cell_borders.push(BorderEntry { row: 5, col: 0, top: true, right: false, bottom: false, left: false });
        assert_eq!(
            item.into_grid(&HeaderNaming::default()),
            Err(FormatError::Grid(GridError::OutOfBounds { row: 5, col: 0 }))
        );

        let mut item = base.clone();
        item.column_headers = vec!["A".into(), "A".into()];
        assert!(matches!(
            item.into_grid(&HeaderNaming::default()),
            Err(FormatError::Grid(GridError::DuplicateHeader { .. }))
        ));

        let mut item = base.clone();
        item.row_headers = vec!["Only".into()];
        assert!(matches!(
            item.into_grid(&HeaderNaming::default()),
            Err(FormatError::Grid(GridError::MismatchedHeaders { axis: Axis::Row, .. }))
        ));

        let mut item = base;
        item.row_count = 0;
        assert!(matches!(
            item.into_grid(&HeaderNaming::default()),
            Err(FormatError::Grid(GridError::InvalidDimensions(_)))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(BorderItem::from_json("{ not json"), Err(FormatError::Json(_))));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invoice.json");

        let item = BorderItem::from_grid("Invoice", &sample_grid());
        item.export(&path).unwrap();
        assert_eq!(BorderItem::import(&path).unwrap(), item);
    }
}
