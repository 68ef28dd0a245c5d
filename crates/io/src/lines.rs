// Legacy line format
//
//   DIMENSIONS:<rows>:<cols>
//   <row>:<col>:<top>:<right>:<bottom>:<left>
//
// One record per line, DIMENSIONS first. Edge fields are 0 or 1. Cells without
// any border are not written.

use std::fs;
use std::path::Path;

use borderline_engine::{parse_dimensions, BorderSpec, BorderStore};

use crate::FormatError;

const DIMENSIONS_TAG: &str = "DIMENSIONS";

/// Serialize a store. Border records are ordered by (row, col).
pub fn write_lines(store: &BorderStore) -> Vec<String> {
    let mut lines = Vec::with_capacity(store.len() + 1);
    lines.push(format!("{DIMENSIONS_TAG}:{}:{}", store.rows(), store.cols()));
    for ((row, col), spec) in store.entries() {
        let [top, right, bottom, left] = spec.edges().map(u8::from);
        lines.push(format!("{row}:{col}:{top}:{right}:{bottom}:{left}"));
    }
    lines
}

/// Rebuild a store from records. Blank lines are ignored.
pub fn read_lines<I, S>(lines: I) -> Result<BorderStore, FormatError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut store: Option<BorderStore> = None;

    for (idx, raw) in lines.into_iter().enumerate() {
        let line_no = idx + 1;
        let line = raw.as_ref().trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(':').map(str::trim).collect();
        if fields[0] == DIMENSIONS_TAG {
            if store.is_some() {
                return Err(FormatError::DuplicateDimensions { line: line_no });
            }
            if fields.len() != 3 {
                return Err(malformed(line_no, format!("expected {DIMENSIONS_TAG}:<rows>:<cols>, got '{line}'")));
            }
            let (rows, cols) = parse_dimensions(fields[1], fields[2])?;
            store = Some(BorderStore::new(rows, cols)?);
            continue;
        }

        let Some(store) = store.as_mut() else {
            return Err(FormatError::MissingDimensions);
        };
        let (row, col, spec) = parse_record(line_no, &fields)?;
        store.set(row, col, spec)?;
    }

    let store = store.ok_or(FormatError::MissingDimensions)?;
    log::debug!(
        "read {} border records for {}x{} grid",
        store.len(),
        store.rows(),
        store.cols()
    );
    Ok(store)
}

fn parse_record(line_no: usize, fields: &[&str]) -> Result<(usize, usize, BorderSpec), FormatError> {
    if fields.len() != 6 {
        return Err(malformed(line_no, format!("expected 6 fields, got {}", fields.len())));
    }

    let index = |text: &str, what: &str| -> Result<usize, FormatError> {
        text.parse::<usize>()
            .map_err(|_| malformed(line_no, format!("invalid {what} '{text}'")))
    };
    let edge = |text: &str| -> Result<bool, FormatError> {
        match text {
            "0" => Ok(false),
            "1" => Ok(true),
            other => Err(malformed(line_no, format!("border field must be 0 or 1, got '{other}'"))),
        }
    };

    let row = index(fields[0], "row")?;
    let col = index(fields[1], "column")?;
    let spec = BorderSpec::new(edge(fields[2])?, edge(fields[3])?, edge(fields[4])?, edge(fields[5])?);
    Ok((row, col, spec))
}

fn malformed(line: usize, message: String) -> FormatError {
    FormatError::Malformed { line, message }
}

/// Write a store as a newline-terminated text file.
pub fn export(store: &BorderStore, path: &Path) -> Result<(), FormatError> {
    let mut content = write_lines(store).join("\n");
    content.push('\n');
    fs::write(path, content)?;
    Ok(())
}

pub fn import(path: &Path) -> Result<BorderStore, FormatError> {
    let content = fs::read_to_string(path)?;
    read_lines(content.lines())
}
