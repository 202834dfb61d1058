//! Delimited serialization and upload/download helpers.
//!
//! The session collaborator stores the last table as semicolon-delimited
//! text, so the table serializes to and parses back from that form
//! losslessly.

use chrono::Local;

use crate::error::{ExtractError, ExtractResult};
use crate::pipeline::schema::columns;
use crate::table::Table;

pub const DELIMITER: u8 = b';';

/// Serialize a table as semicolon-delimited UTF-8 text, header row included,
/// no index column.
pub fn to_delimited(table: &Table) -> ExtractResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_writer(Vec::new());

    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExtractError::export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExtractError::export(e.to_string()))
}

/// Parse a table back from its delimited form.
pub fn from_delimited(data: &str) -> ExtractResult<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .flexible(true)
        .from_reader(data.as_bytes());

    let headers = reader.headers()?.iter().map(str::to_string).collect();
    let mut table = Table::new(headers);
    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter().map(str::to_string).collect());
    }
    Ok(table)
}

/// Download filename of the form `{client_name}_{YYYY-MM-DD}.csv`, taking the
/// client from the table's first row.
pub fn download_filename(table: &Table) -> String {
    let client = table
        .cell(0, columns::CLIENT)
        .filter(|c| !c.is_empty())
        .unwrap_or("default");
    format!("{}_{}.csv", client, Local::now().format("%Y-%m-%d"))
}

/// Upload extension whitelist used by the file-upload collaborator.
pub fn is_allowed_upload(filename: &str) -> bool {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_lowercase().as_str(), "xlsx" | "xls"))
        .unwrap_or(false)
}
