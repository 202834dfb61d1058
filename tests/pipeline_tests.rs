//! End-to-end extraction scenarios.
//!
//! Each test feeds an in-memory workbook through a full pipeline profile and
//! checks the finalized table, the way the external upload collaborator
//! would.

use ordernorm::pipeline::schema::columns;
use ordernorm::{export, DateInputFormat, ExtractError, Overlay, Pipeline, PipelineConfig};
use ordernorm::{Sheet, Workbook};

fn sheet(name: &str, rows: &[&[&str]]) -> Sheet {
    Sheet {
        name: name.to_string(),
        rows: rows
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect(),
    }
}

/// A realistic Antalis pick-up order: annotation rows above the header,
/// noise and separator rows leaking into the data region.
fn antalis_workbook() -> Workbook {
    Workbook::from_sheets(vec![sheet(
        "Antalis",
        &[
            &["Weekly pick-up order", "", "", "", ""],
            &["Pick-up date:", "", "19.08.2024", "", ""],
            &["", "", "", "", ""],
            &["Reference", "Description", "Location", "Unit", "Details"],
            &["DB001", "Widget A", "Bay 7", "pcs", "5"],
            &["Transportation mode", "road", "", "", ""],
            &["DB002", "Widget B", "Bay 1", "pcs", "NA"],
            &["", "", "", "", ""],
            &["DB003", "Supplier Contact signature", "", "", "1"],
        ],
    )])
}

#[test]
fn test_scenario_antalis_extraction() {
    let pipeline = Pipeline::new(PipelineConfig::antalis());
    let extraction = pipeline
        .process_workbook(&antalis_workbook(), "order.xlsx")
        .unwrap();
    let table = &extraction.table;

    assert_eq!(table.columns().to_vec(), columns::final_order());
    assert_eq!(table.len(), 1);
    assert_eq!(table.cell(0, columns::CLIENT), Some("Valeo"));
    assert_eq!(table.cell(0, columns::EXPECTED_DATE), Some("19.08.2024"));
    assert_eq!(table.cell(0, columns::CONFIRMED_DATE), Some(""));
    assert_eq!(table.cell(0, columns::ORDER_REF), Some("DB001"));
    assert_eq!(table.cell(0, columns::PRODUCT), Some("Widget A Bay 7"));
    assert_eq!(table.cell(0, columns::QUANTITY), Some("5"));
}

#[test]
fn test_scenario_noise_text_excludes_row_regardless_of_cells() {
    let workbook = Workbook::from_sheets(vec![sheet(
        "Antalis",
        &[
            &["Reference", "Description", "Location", "Unit", "Details"],
            &["DB010", "Transportation mode by road", "", "pcs", "7"],
            &["DB011", "Widget C", "Bay 2", "pcs", "3"],
        ],
    )]);

    let pipeline = Pipeline::new(PipelineConfig::antalis());
    let table = pipeline
        .process_workbook(&workbook, "order.xlsx")
        .unwrap()
        .table;

    assert_eq!(table.len(), 1);
    assert_eq!(table.cell(0, columns::ORDER_REF), Some("DB011"));
}

#[test]
fn test_scenario_overlay_rewrites_dates_uniformly() {
    let pipeline = Pipeline::new(PipelineConfig::antalis());
    let mut table = pipeline
        .process_workbook(&antalis_workbook(), "order.xlsx")
        .unwrap()
        .table;

    let overlay = Overlay {
        expected_date: Some("25.12.2024".to_string()),
        ..Default::default()
    };
    overlay.apply(&mut table, DateInputFormat::DotDmy).unwrap();

    for row in 0..table.len() {
        assert_eq!(table.cell(row, columns::EXPECTED_DATE), Some("2024-12-25"));
        // Omitted confirmed date is left untouched.
        assert_eq!(table.cell(row, columns::CONFIRMED_DATE), Some(""));
    }
}

#[test]
fn test_scenario_no_sheet_and_no_fallback_fails() {
    let workbook = Workbook::from_sheets(vec![sheet("Totals", &[&["nothing here"]])]);

    let mut config = PipelineConfig::antalis();
    config.sheet_fallback_keyword = None;

    let err = Pipeline::new(config)
        .process_workbook(&workbook, "order.xlsx")
        .unwrap_err();
    assert!(matches!(err, ExtractError::SheetNotFound { .. }));
}

#[test]
fn test_scenario_keyword_fallback_locates_unnamed_sheet() {
    let workbook = Workbook::from_sheets(vec![sheet(
        "Arkusz7",
        &[
            &["", "", "", "Valeo Electric Poland\nul. Przemysłowa 1", ""],
            &["Reference", "Description", "Location", "Unit", "Details"],
            &["DB001", "Widget A", "Bay 7", "pcs", "5"],
        ],
    )]);

    let pipeline = Pipeline::new(PipelineConfig::antalis());
    let extraction = pipeline.process_workbook(&workbook, "order.xlsx").unwrap();

    assert_eq!(extraction.table.len(), 1);
    // The scouted client name beats the configured default.
    assert_eq!(
        extraction.table.cell(0, columns::CLIENT),
        Some("Valeo Electric Poland")
    );
}

#[test]
fn test_scenario_std_pack_two_row_headers() {
    let workbook = Workbook::from_sheets(vec![sheet(
        "Delivery schedule",
        &[
            &["Supplier delivery plan W34", "", "", "", ""],
            &["Reference", "Description", "Ordered in", "Loop Size", "Unit"],
            &["", "", "Std Pack", "", ""],
            &["R-100", "Widget", "4", "25", "pcs"],
            &["R-101", "Gadget", "0", "25", "pcs"],
            &["R-102", "Gizmo", "2", "", "pcs"],
            &["", "", "", "", ""],
            &["R-103", "for the promise of delivery", "1", "1", ""],
        ],
    )]);

    let pipeline = Pipeline::new(PipelineConfig::std_pack());
    let extraction = pipeline.process_workbook(&workbook, "plan.xlsx").unwrap();
    let table = &extraction.table;

    assert_eq!(table.columns().to_vec(), columns::final_order());
    assert_eq!(table.len(), 1);
    assert_eq!(table.cell(0, columns::ORDER_REF), Some("R-100"));
    assert_eq!(table.cell(0, columns::PRODUCT), Some("Widget"));
    assert_eq!(table.cell(0, columns::QUANTITY), Some("100"));
    assert_eq!(table.cell(0, columns::CLIENT), Some("Valeo"));
    assert!(extraction.warnings.is_empty());
}

#[test]
fn test_scenario_missing_required_column_aborts() {
    let workbook = Workbook::from_sheets(vec![sheet(
        "Antalis",
        &[
            // No Details column anywhere.
            &["Reference", "Description", "Location", "Unit"],
            &["DB001", "Widget A", "Bay 7", "pcs"],
        ],
    )]);

    let err = Pipeline::new(PipelineConfig::antalis())
        .process_workbook(&workbook, "order.xlsx")
        .unwrap_err();
    match err {
        ExtractError::MissingColumn { aliases, .. } => {
            assert_eq!(aliases, vec!["Details".to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_scenario_header_never_found_aborts() {
    let workbook = Workbook::from_sheets(vec![sheet(
        "Antalis",
        &[&["just", "annotations"], &["no", "headers"]],
    )]);

    let err = Pipeline::new(PipelineConfig::antalis())
        .process_workbook(&workbook, "order.xlsx")
        .unwrap_err();
    assert!(matches!(err, ExtractError::HeaderNotFound { .. }));
}

#[test]
fn test_session_round_trip_through_delimited_text() {
    let pipeline = Pipeline::new(PipelineConfig::antalis());
    let table = pipeline
        .process_workbook(&antalis_workbook(), "order.xlsx")
        .unwrap()
        .table;

    let stored = export::to_delimited(&table).unwrap();
    let restored = export::from_delimited(&stored).unwrap();
    assert_eq!(restored, table);

    let filename = export::download_filename(&restored);
    assert!(filename.starts_with("Valeo_"));
    assert!(filename.ends_with(".csv"));
}
