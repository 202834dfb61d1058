//! Derived and placeholder fields.

use crate::config::DerivationVariant;
use crate::error::{ExtractError, ExtractResult};
use crate::pipeline::schema::columns;
use crate::table::Table;

/// Intermediate canonical names the derivation variants consume. These come
/// out of the column mapper and are dropped again by the schema finalizer.
pub mod source {
    pub const DESCRIPTION: &str = "Description";
    pub const LOCATION: &str = "Location";
    pub const DETAILS: &str = "Details";
    pub const STD_PACK: &str = "Ordered in Std Pack";
    pub const LOOP_SIZE: &str = "Loop Size";
}

/// Literal a source file uses for "no quantity available".
const NO_QUANTITY_SENTINEL: &str = "NA";

/// Computes quantity and product text, then injects the empty placeholder
/// columns a human editor fills in later. Row count is never changed here;
/// rows that derived an empty or zero quantity are dropped by the row filter.
#[derive(Debug, Clone)]
pub struct FieldDeriver {
    variant: DerivationVariant,
    placeholders: Vec<String>,
}

impl FieldDeriver {
    pub fn new(variant: DerivationVariant, placeholders: Vec<String>) -> Self {
        Self {
            variant,
            placeholders,
        }
    }

    pub fn derive(&self, table: &Table) -> ExtractResult<Table> {
        let mut table = table.clone();
        match self.variant {
            DerivationVariant::Composite => Self::derive_composite(&mut table)?,
            DerivationVariant::Multiplicative => Self::derive_multiplicative(&mut table)?,
        }

        for name in &self.placeholders {
            if table.column_index(name).is_none() {
                table.add_column(name, "");
            }
        }
        Ok(table)
    }

    /// Product text = description + " " + location; quantity comes verbatim
    /// from the details column unless absent or the "NA" sentinel.
    fn derive_composite(table: &mut Table) -> ExtractResult<()> {
        let desc = require(table, source::DESCRIPTION)?;
        let loc = require(table, source::LOCATION)?;
        let details = require(table, source::DETAILS)?;

        table.add_computed_column(columns::PRODUCT, |row| format!("{} {}", row[desc], row[loc]));
        table.add_computed_column(columns::QUANTITY, |row| {
            let value = row[details].trim();
            if value.is_empty() || value == NO_QUANTITY_SENTINEL {
                String::new()
            } else {
                value.to_string()
            }
        });
        Ok(())
    }

    /// Quantity = trunc(pack-count × loop-size); unparseable cells coerce
    /// to 0, so a missing factor zeroes the row out for the filter.
    fn derive_multiplicative(table: &mut Table) -> ExtractResult<()> {
        let pack = require(table, source::STD_PACK)?;
        let loop_size = require(table, source::LOOP_SIZE)?;

        table.add_computed_column(columns::QUANTITY, |row| {
            let quantity = as_number(&row[pack]) * as_number(&row[loop_size]);
            (quantity as i64).to_string()
        });
        Ok(())
    }
}

fn require(table: &Table, column: &str) -> ExtractResult<usize> {
    table
        .column_index(column)
        .ok_or_else(|| ExtractError::schema(column))
}

fn as_number(cell: &str) -> f64 {
    cell.trim().parse().unwrap_or(0.0)
}
