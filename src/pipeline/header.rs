//! Header row location.

use tracing::debug;

use crate::config::CaseMode;
use crate::error::{ExtractError, ExtractResult};
use crate::table::Table;
use crate::workbook::Sheet;

/// Finds the real header row among noise rows.
///
/// Scans top-to-bottom for the first row where at least one cell contains any
/// interest token as a substring. The two source layout families disagree on
/// case-sensitivity, so the match mode is an explicit option rather than a
/// silently unified behavior.
#[derive(Debug, Clone)]
pub struct HeaderLocator {
    tokens: Vec<String>,
    case: CaseMode,
    two_row: bool,
}

impl HeaderLocator {
    pub fn new(tokens: Vec<String>, case: CaseMode, two_row: bool) -> Self {
        Self {
            tokens,
            case,
            two_row,
        }
    }

    /// Index of the first row containing any interest token.
    pub fn locate(&self, sheet: &Sheet) -> ExtractResult<usize> {
        for (idx, row) in sheet.rows.iter().enumerate() {
            if row.iter().any(|cell| self.cell_matches(cell)) {
                debug!(row = idx, "header row located");
                return Ok(idx);
            }
        }
        Err(ExtractError::header_not_found(sheet.name.clone()))
    }

    /// Materialize the data region below the header row as a table with
    /// normalized header names.
    ///
    /// In two-row mode the header text for a column is the space-joined,
    /// whitespace-collapsed concatenation of the header cell and the cell
    /// directly below it (merged-cell layouts split captions that way).
    pub fn read_table(&self, sheet: &Sheet, header_row: usize) -> Table {
        let empty = Vec::new();
        let top = sheet.rows.get(header_row).unwrap_or(&empty);

        let (headers, data_start) = if self.two_row {
            let bottom = sheet.rows.get(header_row + 1).unwrap_or(&empty);
            let width = top.len().max(bottom.len());
            let headers: Vec<String> = (0..width)
                .map(|i| {
                    let top_cell = top.get(i).map(String::as_str).unwrap_or("");
                    let bottom_cell = bottom.get(i).map(String::as_str).unwrap_or("");
                    collapse_whitespace(&format!("{top_cell} {bottom_cell}"))
                })
                .collect();
            (headers, header_row + 2)
        } else {
            let headers: Vec<String> =
                top.iter().map(|cell| collapse_whitespace(cell)).collect();
            (headers, header_row + 1)
        };

        let mut table = Table::new(headers);
        for row in sheet.rows.iter().skip(data_start) {
            table.push_row(row.clone());
        }
        table
    }

    fn cell_matches(&self, cell: &str) -> bool {
        match self.case {
            CaseMode::Sensitive => self.tokens.iter().any(|t| cell.contains(t.as_str())),
            CaseMode::Insensitive => {
                let cell = cell.to_lowercase();
                self.tokens
                    .iter()
                    .any(|t| cell.contains(&t.to_lowercase()))
            }
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
