//! Order extraction pipeline.
//!
//! One synchronous, strictly forward pass per workbook:
//! locate sheet → locate header → map columns → derive fields → filter rows
//! → finalize schema. Any stage failure aborts the whole run; there is no
//! partial output.

pub mod columns;
pub mod derive;
pub mod filter;
pub mod header;
pub mod metadata;
pub mod schema;
pub mod sheet;

pub use columns::{ColumnAliases, ColumnMapper, HeaderSpec};
pub use derive::FieldDeriver;
pub use filter::RowFilter;
pub use header::HeaderLocator;
pub use metadata::MetadataScout;
pub use schema::SchemaFinalizer;
pub use sheet::SheetLocator;

use std::path::Path;

use tracing::{debug, info};
use uuid::Uuid;

use crate::config::PipelineConfig;
use crate::error::ExtractResult;
use crate::table::Table;
use crate::workbook::Workbook;

/// Result envelope for one processed workbook.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub id: Uuid,
    pub filename: String,
    pub table: Table,
    /// Non-fatal findings, e.g. a metadata keyword that matched nothing.
    pub warnings: Vec<String>,
}

/// The pipeline driver. Built once from a [`PipelineConfig`], reusable across
/// files; holds no per-run state.
pub struct Pipeline {
    config: PipelineConfig,
    sheet_locator: SheetLocator,
    header_locator: HeaderLocator,
    mapper: ColumnMapper,
    deriver: FieldDeriver,
    filter: RowFilter,
    finalizer: SchemaFinalizer,
    scout: MetadataScout,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let sheet_locator = SheetLocator::new(
            config.sheet_candidates.clone(),
            config.sheet_fallback_keyword.clone(),
        );
        let header_locator = HeaderLocator::new(
            config.header_tokens.clone(),
            config.header_case,
            config.two_row_headers,
        );
        let mapper = ColumnMapper::new(config.header_spec.clone());
        let deriver = FieldDeriver::new(config.derivation, config.placeholder_columns.clone());
        let filter = RowFilter::new(
            config.reference_column.clone(),
            config.quantity_column.clone(),
            config.exclusion_literal.clone(),
            config.noise_fragments.clone(),
        );
        let finalizer = SchemaFinalizer::new(config.final_columns.clone());
        let scout = MetadataScout::new(
            config.client_keyword.clone(),
            config.client_scan_column,
            config.expected_date_keyword.clone(),
        );

        Self {
            config,
            sheet_locator,
            header_locator,
            mapper,
            deriver,
            filter,
            finalizer,
            scout,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process a workbook file on disk.
    pub fn process_path(&self, path: impl AsRef<Path>) -> ExtractResult<Extraction> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let workbook = Workbook::from_path(path)?;
        self.process_workbook(&workbook, &filename)
    }

    /// Process an uploaded workbook held in memory.
    pub fn process_bytes(&self, filename: &str, data: &[u8]) -> ExtractResult<Extraction> {
        let workbook = Workbook::from_bytes(data)?;
        self.process_workbook(&workbook, filename)
    }

    pub fn process_workbook(
        &self,
        workbook: &Workbook,
        filename: &str,
    ) -> ExtractResult<Extraction> {
        let mut warnings = Vec::new();

        let sheet = self.sheet_locator.locate(workbook)?;
        info!(file = %filename, sheet = %sheet.name, "located order sheet");

        let header_row = self.header_locator.locate(sheet)?;
        let raw = self.header_locator.read_table(sheet, header_row);
        debug!(header_row, raw_columns = raw.columns().len(), "materialized data region");

        let mapped = self.mapper.map(&raw)?;
        let derived = self.deriver.derive(&mapped)?;
        let mut table = self.filter.filter(&derived);

        // Defaults go in after filtering, so blank-row detection still saw
        // genuinely blank source rows.
        let client = match self.scout.client_name(sheet) {
            Some(client) => client,
            None => {
                if self.scout.wants_client() {
                    warnings.push("client keyword matched nothing; using default".to_string());
                }
                self.config.default_client.clone()
            }
        };
        table.set_column(schema::columns::CLIENT, &client);

        match self.scout.keyword_date(sheet) {
            Some(date) => {
                table.set_column(schema::columns::EXPECTED_DATE, &date);
            }
            None if self.scout.wants_date() => {
                warnings.push("expected-date keyword matched nothing".to_string());
            }
            None => {}
        }

        let table = self.finalizer.finalize(&table)?;
        info!(file = %filename, rows = table.len(), "extraction complete");

        Ok(Extraction {
            id: Uuid::new_v4(),
            filename: filename.to_string(),
            table,
            warnings,
        })
    }
}
