//! In-memory tabular data.
//!
//! Every pipeline stage consumes and produces a [`Table`]: an ordered list of
//! column names plus stringly-typed rows. The empty string is the "unset"
//! sentinel throughout; a cell is never absent.

use serde::{Deserialize, Serialize};

/// Column-ordered table of string cells.
///
/// Invariant: every row holds exactly `columns.len()` cells. The constructors
/// and mutators enforce this by padding short rows with empty strings and
/// truncating long ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn with_rows(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows (the header is not a row).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| r[idx].as_str())
    }

    /// Append a row, padding or truncating it to the column count.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    /// Append a column filled with `value` in every existing row.
    pub fn add_column(&mut self, name: &str, value: &str) {
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(value.to_string());
        }
    }

    /// Append a column whose cells are computed from each existing row.
    pub fn add_computed_column(&mut self, name: &str, f: impl Fn(&[String]) -> String) {
        let values: Vec<String> = self.rows.iter().map(|row| f(row)).collect();
        self.columns.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
    }

    /// Bulk-rewrite an existing column to a single value across all rows.
    /// Returns false (and leaves the table untouched) when the column does
    /// not exist.
    pub fn set_column(&mut self, name: &str, value: &str) -> bool {
        let Some(idx) = self.column_index(name) else {
            return false;
        };
        for row in &mut self.rows {
            row[idx] = value.to_string();
        }
        true
    }

    /// Keep only rows matching the predicate, preserving order.
    pub fn retain_rows(&mut self, mut keep: impl FnMut(&[String]) -> bool) {
        self.rows.retain(|row| keep(row));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_push_row_enforces_width() {
        let mut table = Table::new(strings(&["a", "b", "c"]));
        table.push_row(strings(&["1"]));
        table.push_row(strings(&["1", "2", "3", "4"]));

        assert_eq!(table.rows()[0], strings(&["1", "", ""]));
        assert_eq!(table.rows()[1], strings(&["1", "2", "3"]));
    }

    #[test]
    fn test_set_column_rewrites_all_rows() {
        let mut table = Table::with_rows(
            strings(&["a", "b"]),
            vec![strings(&["1", "x"]), strings(&["2", "y"])],
        );

        assert!(table.set_column("b", "z"));
        assert_eq!(table.cell(0, "b"), Some("z"));
        assert_eq!(table.cell(1, "b"), Some("z"));
        assert!(!table.set_column("missing", "z"));
    }

    #[test]
    fn test_add_computed_column() {
        let mut table = Table::with_rows(
            strings(&["a", "b"]),
            vec![strings(&["1", "x"]), strings(&["2", "y"])],
        );
        table.add_computed_column("ab", |row| format!("{}{}", row[0], row[1]));

        assert_eq!(table.cell(0, "ab"), Some("1x"));
        assert_eq!(table.cell(1, "ab"), Some("2y"));
    }
}
