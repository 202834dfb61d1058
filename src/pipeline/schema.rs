//! Final output schema.
//!
//! The output vocabulary is fixed: the production-planning import format the
//! normalized table is fed into names its columns in Polish, and the pipeline
//! guarantees exactly these columns in exactly this order.

use crate::error::{ExtractError, ExtractResult};
use crate::table::Table;

/// Canonical output column names.
pub mod columns {
    pub const CLIENT: &str = "Klient";
    pub const EXPECTED_DATE: &str = "Oczekiwany termin realizacji";
    pub const CONFIRMED_DATE: &str = "Termin potwierdzony";
    pub const ORDER_REF: &str = "Zewn. nr zamówienia";
    pub const PRODUCT: &str = "Produkt";
    pub const QUANTITY: &str = "Sztuk";
    pub const REMARKS_ALL: &str = "Uwagi dla wszystkich";
    pub const REMARKS_INTERNAL: &str = "Uwagi niewidoczne dla produkcji";
    pub const ATTRIBUTE_1: &str = "Atrybut 1 (opcjonalnie)";
    pub const ATTRIBUTE_2: &str = "Atrybut 2 (opcjonalnie)";
    pub const ATTRIBUTE_3: &str = "Atrybut 3 (opcjonalnie)";

    /// The fixed final column order of the output table.
    pub fn final_order() -> Vec<String> {
        [
            CLIENT,
            EXPECTED_DATE,
            CONFIRMED_DATE,
            ORDER_REF,
            PRODUCT,
            QUANTITY,
            REMARKS_ALL,
            REMARKS_INTERNAL,
            ATTRIBUTE_1,
            ATTRIBUTE_2,
            ATTRIBUTE_3,
        ]
        .iter()
        .map(|c| c.to_string())
        .collect()
    }

    /// Columns a human editor supplies downstream; injected empty by the
    /// field deriver.
    pub fn placeholders() -> Vec<String> {
        [
            CLIENT,
            EXPECTED_DATE,
            CONFIRMED_DATE,
            REMARKS_ALL,
            REMARKS_INTERNAL,
            ATTRIBUTE_1,
            ATTRIBUTE_2,
            ATTRIBUTE_3,
        ]
        .iter()
        .map(|c| c.to_string())
        .collect()
    }
}

/// Selects and reorders the final fixed column set.
#[derive(Debug, Clone)]
pub struct SchemaFinalizer {
    order: Vec<String>,
}

impl SchemaFinalizer {
    pub fn new(order: Vec<String>) -> Self {
        Self { order }
    }

    /// Project the table onto exactly `order`, in that order. A missing
    /// column here means an upstream stage broke its contract.
    pub fn finalize(&self, table: &Table) -> ExtractResult<Table> {
        let mut indices = Vec::with_capacity(self.order.len());
        for name in &self.order {
            let idx = table
                .column_index(name)
                .ok_or_else(|| ExtractError::schema(name.clone()))?;
            indices.push(idx);
        }

        let mut out = Table::new(self.order.clone());
        for row in table.rows() {
            out.push_row(indices.iter().map(|&i| row[i].clone()).collect());
        }
        Ok(out)
    }
}
