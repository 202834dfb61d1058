//! Noise row removal.

use tracing::debug;

use crate::table::Table;

/// Removes rows that are structurally present but not business records.
///
/// Steps, in order: reference-key filtering, zero/empty quantity, blank
/// separator rows, noise text fragments. The order matters: a row with a
/// blank reference key but other cells filled must fall to step 1, not
/// survive the blank-row check of step 3.
#[derive(Debug, Clone)]
pub struct RowFilter {
    reference_column: String,
    quantity_column: String,
    exclusion_literal: String,
    noise_fragments: Vec<String>,
}

impl RowFilter {
    pub fn new(
        reference_column: String,
        quantity_column: String,
        exclusion_literal: String,
        noise_fragments: Vec<String>,
    ) -> Self {
        Self {
            reference_column,
            quantity_column,
            exclusion_literal,
            noise_fragments,
        }
    }

    pub fn filter(&self, table: &Table) -> Table {
        let mut table = table.clone();
        let before = table.len();

        // 1. Reference key must be present and must not be the section
        //    header literal that leaks into the data region.
        if let Some(reference) = table.column_index(&self.reference_column) {
            let literal = self.exclusion_literal.as_str();
            table.retain_rows(|row| {
                let key = row[reference].trim();
                !key.is_empty() && key != literal
            });
        }

        // 2. Quantity must resolve to something non-zero.
        if let Some(quantity) = table.column_index(&self.quantity_column) {
            table.retain_rows(|row| {
                let value = row[quantity].trim();
                !value.is_empty() && value.parse::<f64>().map(|n| n != 0.0).unwrap_or(true)
            });
        }

        // 3. Purely blank separator rows.
        table.retain_rows(|row| row.iter().any(|cell| !cell.trim().is_empty()));

        // 4. Boilerplate and signature fragments, matched anywhere in the
        //    stringified row.
        table.retain_rows(|row| {
            let rendered = row.join(" ");
            !self
                .noise_fragments
                .iter()
                .any(|fragment| rendered.contains(fragment.as_str()))
        });

        debug!(rows_before = before, rows_after = table.len(), "row filter applied");
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn filter() -> RowFilter {
        RowFilter::new(
            "Ref".to_string(),
            "Qty".to_string(),
            "Transportation mode".to_string(),
            vec![
                "Supplier Contact signature".to_string(),
                "____________________".to_string(),
            ],
        )
    }

    fn table(rows: Vec<Vec<String>>) -> Table {
        Table::with_rows(strings(&["Ref", "Qty", "Note"]), rows)
    }

    #[test]
    fn test_blank_reference_drops_even_nonblank_rows() {
        let out = filter().filter(&table(vec![
            strings(&["", "5", "still has content"]),
            strings(&["DB001", "5", ""]),
        ]));
        assert_eq!(out.len(), 1);
        assert_eq!(out.cell(0, "Ref"), Some("DB001"));
    }

    #[test]
    fn test_exclusion_literal_in_reference_drops_row() {
        let out = filter().filter(&table(vec![strings(&["Transportation mode", "5", ""])]));
        assert!(out.is_empty());
    }

    #[test]
    fn test_zero_and_empty_quantity_drop() {
        let out = filter().filter(&table(vec![
            strings(&["DB001", "0", ""]),
            strings(&["DB002", "", ""]),
            strings(&["DB003", "0.0", ""]),
            strings(&["DB004", "3", ""]),
        ]));
        assert_eq!(out.len(), 1);
        assert_eq!(out.cell(0, "Ref"), Some("DB004"));
    }

    #[test]
    fn test_noise_fragment_anywhere_drops_row() {
        let out = filter().filter(&table(vec![
            strings(&["DB001", "5", "Supplier Contact signature: _____"]),
            strings(&["DB002", "5", "deliver to bay 7"]),
        ]));
        assert_eq!(out.len(), 1);
        assert_eq!(out.cell(0, "Ref"), Some("DB002"));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let input = table(vec![
            strings(&["DB001", "5", "ok"]),
            strings(&["", "", ""]),
            strings(&["DB002", "0", ""]),
        ]);
        let once = filter().filter(&input);
        let twice = filter().filter(&once);
        assert_eq!(once, twice);
    }
}
