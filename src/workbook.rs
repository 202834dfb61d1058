//! Workbook loading.
//!
//! Loads every sheet of a spreadsheet file eagerly through `calamine` and
//! stringifies each cell once, so the pipeline stages can work on plain
//! string grids without caring about the on-disk format.

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto, open_workbook_from_rs, Reader, Xlsx};

use crate::error::{ExtractError, ExtractResult};

/// One named sheet as an ordered 2-D grid of stringified cells.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Cell value at (row, col); missing cells read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Full textual rendering, used by the keyword fallback scan.
    pub fn to_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join(" "))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Ordered collection of named sheets, immutable once loaded.
#[derive(Debug, Clone)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    /// Open a workbook file on disk; the format is detected from content.
    pub fn from_path(path: impl AsRef<Path>) -> ExtractResult<Self> {
        let mut workbook = open_workbook_auto(path.as_ref())?;
        Self::read_all(&mut workbook)
    }

    /// Open an XLSX workbook from an in-memory byte stream.
    pub fn from_bytes(data: &[u8]) -> ExtractResult<Self> {
        let cursor = Cursor::new(data.to_vec());
        let mut workbook: Xlsx<_> = open_workbook_from_rs(cursor)?;
        Self::read_all(&mut workbook)
    }

    /// Build a workbook directly from sheets, bypassing file parsing.
    pub fn from_sheets(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    fn read_all<RS, R>(reader: &mut R) -> ExtractResult<Self>
    where
        RS: Read + Seek,
        R: Reader<RS>,
        R::Error: std::fmt::Display,
    {
        let mut sheets = Vec::new();
        for name in reader.sheet_names().to_owned() {
            let range = reader
                .worksheet_range(&name)
                .ok_or_else(|| {
                    ExtractError::workbook(format!("sheet '{name}' vanished while reading"))
                })?
                .map_err(|e| ExtractError::workbook(e.to_string()))?;

            let rows = range
                .rows()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect();
            sheets.push(Sheet { name, rows });
        }
        Ok(Self { sheets })
    }
}
