//! Grouped Row Sort
//!
//! Sorts a display list made of group header rows ("parents") each followed by
//! its leaf rows ("children"):
//! - Parents are sorted among themselves
//! - Children are sorted within their own parent only
//! - Collapsed parents hide their children from the flattened output, but the
//!   children stay in the model and are still sorted
//!
//! Leaves that appear before the first group header belong to no parent. They
//! are kept as a leading ungrouped block, sorted on their own, and always shown.

use std::cmp::Ordering;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

// =============================================================================
// Row model
// =============================================================================

/// A displayed cell value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellValue {
    Text(String),
    Number(OrderedFloat<f64>),
    Bool(bool),
}

impl CellValue {
    pub fn number(n: f64) -> Self {
        CellValue::Number(OrderedFloat(n))
    }

    /// Canonical text form. Comparisons are made on this string.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", n.0 as i64)
                } else {
                    format!("{}", n.0)
                }
            }
            CellValue::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

/// A group header row. `expanded` decides whether its children are displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRow {
    pub values: Vec<Option<CellValue>>,
    pub expanded: bool,
}

/// A plain data row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafRow {
    pub values: Vec<Option<CellValue>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DisplayRow {
    GroupHeader(GroupRow),
    Leaf(LeafRow),
}

impl DisplayRow {
    pub fn group(values: Vec<Option<CellValue>>, expanded: bool) -> Self {
        DisplayRow::GroupHeader(GroupRow { values, expanded })
    }

    pub fn leaf(values: Vec<Option<CellValue>>) -> Self {
        DisplayRow::Leaf(LeafRow { values })
    }

    pub fn values(&self) -> &[Option<CellValue>] {
        match self {
            DisplayRow::GroupHeader(g) => &g.values,
            DisplayRow::Leaf(l) => &l.values,
        }
    }

    /// Value at a column; `None` when missing or past the end of the row.
    pub fn value(&self, col: usize) -> Option<&CellValue> {
        self.values().get(col).and_then(Option::as_ref)
    }

    pub fn is_group_header(&self) -> bool {
        matches!(self, DisplayRow::GroupHeader(_))
    }
}

// =============================================================================
// Sort keys
// =============================================================================

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// One level of a multi-column sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub column: usize,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn ascending(column: usize) -> Self {
        Self { column, direction: SortDirection::Ascending }
    }

    pub fn descending(column: usize) -> Self {
        Self { column, direction: SortDirection::Descending }
    }
}

/// Compare two rows key by key; the first non-equal key decides.
/// Missing values sort after present ones regardless of direction.
pub fn compare_rows(a: &DisplayRow, b: &DisplayRow, keys: &[SortKey]) -> Ordering {
    compare_values(a.values(), b.values(), keys)
}

fn text_at(values: &[Option<CellValue>], col: usize) -> Option<String> {
    values.get(col).and_then(Option::as_ref).map(CellValue::to_text)
}

fn compare_values(a: &[Option<CellValue>], b: &[Option<CellValue>], keys: &[SortKey]) -> Ordering {
    for key in keys {
        let ordering = match (text_at(a, key.column), text_at(b, key.column)) {
            (Some(x), Some(y)) => match key.direction {
                SortDirection::Ascending => x.cmp(&y),
                SortDirection::Descending => y.cmp(&x),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

// =============================================================================
// Grouped model
// =============================================================================

/// A parent row and the leaves that followed it.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub header: GroupRow,
    pub children: Vec<LeafRow>,
}

/// Display rows regrouped into parent/children structure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedRows {
    /// Leaves before the first group header.
    pub ungrouped: Vec<LeafRow>,
    pub groups: Vec<Group>,
}

impl GroupedRows {
    /// Partition a flat display list. Each leaf joins the nearest preceding header.
    pub fn from_display(rows: &[DisplayRow]) -> Self {
        let mut grouped = Self::default();
        for row in rows {
            match row {
                DisplayRow::GroupHeader(header) => grouped.groups.push(Group {
                    header: header.clone(),
                    children: Vec::new(),
                }),
                DisplayRow::Leaf(leaf) => match grouped.groups.last_mut() {
                    Some(group) => group.children.push(leaf.clone()),
                    None => grouped.ungrouped.push(leaf.clone()),
                },
            }
        }
        if !grouped.ungrouped.is_empty() {
            log::debug!("{} leaf rows precede the first group header", grouped.ungrouped.len());
        }
        grouped
    }

    /// Stable sort of parents, then of each parent's children. Empty keys are a no-op.
    pub fn sort(&mut self, keys: &[SortKey]) {
        if keys.is_empty() {
            return;
        }
        self.ungrouped.sort_by(|a, b| compare_values(&a.values, &b.values, keys));
        self.groups.sort_by(|a, b| compare_values(&a.header.values, &b.header.values, keys));
        for group in &mut self.groups {
            group.children.sort_by(|a, b| compare_values(&a.values, &b.values, keys));
        }
    }

    pub fn set_expanded(&mut self, group_index: usize, expanded: bool) {
        if let Some(group) = self.groups.get_mut(group_index) {
            group.header.expanded = expanded;
        }
    }

    /// Flatten for display: ungrouped leaves, then each header followed by its
    /// children if it is expanded.
    pub fn flatten(&self) -> Vec<DisplayRow> {
        let mut rows: Vec<DisplayRow> = self.ungrouped.iter().cloned().map(DisplayRow::Leaf).collect();
        for group in &self.groups {
            rows.push(DisplayRow::GroupHeader(group.header.clone()));
            if group.header.expanded {
                rows.extend(group.children.iter().cloned().map(DisplayRow::Leaf));
            }
        }
        rows
    }
}

/// Sort a flat display list by group and return the rows to display.
///
/// With no sort keys the input is returned unchanged.
pub fn sort_grouped_rows(rows: &[DisplayRow], keys: &[SortKey]) -> Vec<DisplayRow> {
    if keys.is_empty() {
        return rows.to_vec();
    }
    let mut grouped = GroupedRows::from_display(rows);
    grouped.sort(keys);
    grouped.flatten()
}
