use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Extraction failure taxonomy.
///
/// Every variant is fatal for the pipeline run that raised it; there is no
/// partial-success mode. `Schema` indicates a contract breach between
/// pipeline stages rather than a problem with the uploaded file.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ExtractError {
    #[error("no usable sheet: none of {candidates:?} present and keyword fallback found nothing")]
    SheetNotFound { candidates: Vec<String> },

    #[error("could not locate header row in sheet '{sheet}'")]
    HeaderNotFound { sheet: String },

    #[error("no matching source column for '{canonical}': tried aliases {aliases:?}")]
    MissingColumn {
        canonical: String,
        aliases: Vec<String>,
    },

    #[error("schema violation: expected column '{column}' is missing")]
    Schema { column: String },

    #[error("workbook error: {message}")]
    Workbook { message: String },

    #[error("invalid date for {field}: '{value}' does not match {expected}")]
    InvalidDate {
        field: String,
        value: String,
        expected: String,
    },

    #[error("export error: {message}")]
    Export { message: String },

    #[error("io error: {message}")]
    Io { message: String },
}

impl ExtractError {
    pub fn sheet_not_found(candidates: &[String]) -> Self {
        Self::SheetNotFound {
            candidates: candidates.to_vec(),
        }
    }

    pub fn header_not_found(sheet: impl Into<String>) -> Self {
        Self::HeaderNotFound {
            sheet: sheet.into(),
        }
    }

    pub fn missing_column(canonical: impl Into<String>, aliases: &[String]) -> Self {
        Self::MissingColumn {
            canonical: canonical.into(),
            aliases: aliases.to_vec(),
        }
    }

    pub fn schema(column: impl Into<String>) -> Self {
        Self::Schema {
            column: column.into(),
        }
    }

    pub fn workbook(message: impl Into<String>) -> Self {
        Self::Workbook {
            message: message.into(),
        }
    }

    pub fn export(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::SheetNotFound { .. } => "SHEET_NOT_FOUND",
            Self::HeaderNotFound { .. } => "HEADER_NOT_FOUND",
            Self::MissingColumn { .. } => "MISSING_COLUMN",
            Self::Schema { .. } => "SCHEMA_ERROR",
            Self::Workbook { .. } => "WORKBOOK_ERROR",
            Self::InvalidDate { .. } => "INVALID_DATE",
            Self::Export { .. } => "EXPORT_ERROR",
            Self::Io { .. } => "IO_ERROR",
        }
    }

    /// True for failures that point at our own stage wiring rather than at
    /// the uploaded file.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }
}

pub type ExtractResult<T> = Result<T, ExtractError>;

/// Wire form of an extraction failure, for the web collaborator.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl From<ExtractError> for ErrorResponse {
    fn from(error: ExtractError) -> Self {
        let details = match &error {
            ExtractError::MissingColumn { aliases, .. } => {
                Some(serde_json::json!({ "unmatched_aliases": aliases }))
            }
            ExtractError::SheetNotFound { candidates } => {
                Some(serde_json::json!({ "candidates": candidates }))
            }
            _ => None,
        };
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            details,
        }
    }
}

// Conversion from common error types
impl From<std::io::Error> for ExtractError {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for ExtractError {
    fn from(error: csv::Error) -> Self {
        Self::export(error.to_string())
    }
}

impl From<calamine::Error> for ExtractError {
    fn from(error: calamine::Error) -> Self {
        Self::workbook(error.to_string())
    }
}

impl From<calamine::XlsxError> for ExtractError {
    fn from(error: calamine::XlsxError) -> Self {
        Self::workbook(error.to_string())
    }
}
