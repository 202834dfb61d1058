//! Sheet metadata scouting.
//!
//! Order sheets carry the client name and pick-up date as free text above the
//! data region. Both lookups are best-effort: a miss falls back to configured
//! defaults and is reported as a warning, never an error.

use regex::RegexBuilder;

use crate::workbook::Sheet;

#[derive(Debug, Clone)]
pub struct MetadataScout {
    client_keyword: Option<String>,
    client_scan_column: usize,
    date_keyword: Option<String>,
}

impl MetadataScout {
    pub fn new(
        client_keyword: Option<String>,
        client_scan_column: usize,
        date_keyword: Option<String>,
    ) -> Self {
        Self {
            client_keyword,
            client_scan_column,
            date_keyword,
        }
    }

    pub fn wants_client(&self) -> bool {
        self.client_keyword.is_some()
    }

    pub fn wants_date(&self) -> bool {
        self.date_keyword.is_some()
    }

    /// Scan the designated column for the client keyword; the client name is
    /// the matched cell's text up to the first newline or comma.
    pub fn client_name(&self, sheet: &Sheet) -> Option<String> {
        let keyword = self.client_keyword.as_deref()?;

        for row in &sheet.rows {
            let Some(cell) = row.get(self.client_scan_column) else {
                continue;
            };
            if cell.contains(keyword) {
                let first_line = cell.split('\n').next().unwrap_or(cell);
                let name = first_line.split(',').next().unwrap_or(first_line).trim();
                if !name.is_empty() {
                    return Some(name.to_string());
                }
            }
        }
        None
    }

    /// Scan every cell for the date keyword (whole word, case-insensitive);
    /// the date is the first non-empty cell to the right of the hit. Scanning
    /// stops at the first hit even when nothing usable sits to its right.
    pub fn keyword_date(&self, sheet: &Sheet) -> Option<String> {
        let keyword = self.date_keyword.as_deref()?;
        let pattern = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(keyword)))
            .case_insensitive(true)
            .build()
            .ok()?;

        for row in &sheet.rows {
            for (col, cell) in row.iter().enumerate() {
                if pattern.is_match(cell) {
                    return row[col + 1..]
                        .iter()
                        .map(|c| c.trim())
                        .find(|c| !c.is_empty())
                        .map(|c| c.to_string());
                }
            }
        }
        None
    }
}
