//! Post-extraction correction overlay.
//!
//! The human editor can override the client name and both dates after the
//! file was extracted. The overlay is a bulk rewrite across all rows of the
//! caller's table copy; the caller owns the session-style "last table" state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::DateInputFormat;
use crate::error::{ExtractError, ExtractResult};
use crate::pipeline::schema::columns;
use crate::table::Table;

/// User-submitted correction values. Blank or absent fields leave the
/// corresponding column untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Overlay {
    pub client_name: Option<String>,
    pub expected_date: Option<String>,
    pub confirmed_date: Option<String>,
}

impl Overlay {
    /// Apply the overlay to a finalized table, all rows or none.
    ///
    /// Supplied dates are reparsed from the deployment's input format into
    /// canonical `YYYY-MM-DD`. Both dates are validated before any column is
    /// touched, so a malformed date leaves the table unchanged.
    pub fn apply(&self, table: &mut Table, format: DateInputFormat) -> ExtractResult<()> {
        let expected = reparse_date(self.expected_date.as_deref(), format, "expected_date")?;
        let confirmed = reparse_date(self.confirmed_date.as_deref(), format, "confirmed_date")?;

        if let Some(client) = self.client_name.as_deref() {
            let client = client.trim();
            if !client.is_empty() {
                table.set_column(columns::CLIENT, client);
            }
        }
        if let Some(date) = expected {
            table.set_column(columns::EXPECTED_DATE, &date);
        }
        if let Some(date) = confirmed {
            table.set_column(columns::CONFIRMED_DATE, &date);
        }
        Ok(())
    }
}

fn reparse_date(
    value: Option<&str>,
    format: DateInputFormat,
    field: &str,
) -> ExtractResult<Option<String>> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let date = NaiveDate::parse_from_str(raw, format.pattern()).map_err(|_| {
        ExtractError::InvalidDate {
            field: field.to_string(),
            value: raw.to_string(),
            expected: format.describe().to_string(),
        }
    })?;
    Ok(Some(date.format("%Y-%m-%d").to_string()))
}
