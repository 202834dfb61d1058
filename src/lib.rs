//! Ordernorm
//!
//! Extracts structured order records from loosely-formatted spreadsheet
//! exports (multi-row headers, inconsistent column names, free-text
//! annotation rows) and normalizes them into a fixed-schema table.
//!
//! The pipeline is the core of the crate; web upload/download/edit endpoints
//! and session storage are external collaborators that hand a file path (or
//! byte stream) to [`Pipeline`] and get back a normalized table plus an
//! editable client-name/date [`Overlay`].

pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod overlay;
pub mod pipeline;
pub mod table;
pub mod workbook;

pub use config::{
    AppConfig, CaseMode, DateInputFormat, DerivationVariant, LoggingConfig, PipelineConfig,
};
pub use error::{ErrorResponse, ExtractError, ExtractResult};
pub use overlay::Overlay;
pub use pipeline::{Extraction, HeaderSpec, Pipeline};
pub use table::Table;
pub use workbook::{Sheet, Workbook};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.profile, "antalis");
        assert!(config.pipeline().is_some());
    }

    #[test]
    fn test_error_codes() {
        let error = ExtractError::sheet_not_found(&["Antalis".to_string()]);
        assert_eq!(error.error_code(), "SHEET_NOT_FOUND");
        assert!(!error.is_internal());
    }
}
