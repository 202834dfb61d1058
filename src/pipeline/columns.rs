//! Canonical column mapping.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ExtractError, ExtractResult};
use crate::table::Table;

/// Aliases accepted for one canonical column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnAliases {
    pub canonical: String,
    pub aliases: Vec<String>,
}

/// Ordered list of (canonical name, accepted alias substrings) pairs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeaderSpec {
    pub columns: Vec<ColumnAliases>,
}

impl HeaderSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, canonical: &str, aliases: &[&str]) -> Self {
        self.columns.push(ColumnAliases {
            canonical: canonical.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        });
        self
    }
}

/// Maps raw source headers to the canonical schema.
///
/// For each canonical entry, aliases are tried in listed order and raw
/// headers in their original left-to-right order; the first raw header
/// containing the alias as a substring wins. Unselected raw columns are
/// dropped. Any canonical entry without a match aborts the pipeline.
#[derive(Debug, Clone)]
pub struct ColumnMapper {
    spec: HeaderSpec,
}

impl ColumnMapper {
    pub fn new(spec: HeaderSpec) -> Self {
        Self { spec }
    }

    pub fn map(&self, table: &Table) -> ExtractResult<Table> {
        let mut canonical = Vec::with_capacity(self.spec.columns.len());
        let mut indices = Vec::with_capacity(self.spec.columns.len());

        for entry in &self.spec.columns {
            // Substring containment can over-match ("Reference" also hits
            // "Cross-Reference"); kept as-is for source-format compatibility.
            let matched = entry.aliases.iter().find_map(|alias| {
                table
                    .columns()
                    .iter()
                    .position(|raw| raw.contains(alias.as_str()))
            });

            match matched {
                Some(idx) => {
                    debug!(
                        canonical = %entry.canonical,
                        source = %table.columns()[idx],
                        "mapped source column"
                    );
                    canonical.push(entry.canonical.clone());
                    indices.push(idx);
                }
                None => {
                    return Err(ExtractError::missing_column(
                        entry.canonical.clone(),
                        &entry.aliases,
                    ))
                }
            }
        }

        let mut out = Table::new(canonical);
        for row in table.rows() {
            out.push_row(indices.iter().map(|&i| row[i].clone()).collect());
        }
        Ok(out)
    }
}
