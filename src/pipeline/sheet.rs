//! Sheet location.

use tracing::debug;

use crate::error::{ExtractError, ExtractResult};
use crate::workbook::{Sheet, Workbook};

/// Picks the sheet holding the order data.
///
/// Candidate names are tried in order; when none exists and a fallback
/// keyword is configured, every sheet's full textual rendering is scanned for
/// the keyword (case-sensitive substring) in sheet order.
#[derive(Debug, Clone)]
pub struct SheetLocator {
    candidates: Vec<String>,
    fallback_keyword: Option<String>,
}

impl SheetLocator {
    pub fn new(candidates: Vec<String>, fallback_keyword: Option<String>) -> Self {
        Self {
            candidates,
            fallback_keyword,
        }
    }

    pub fn locate<'wb>(&self, workbook: &'wb Workbook) -> ExtractResult<&'wb Sheet> {
        for name in &self.candidates {
            if let Some(sheet) = workbook.sheet(name) {
                debug!(sheet = %name, "candidate sheet name matched");
                return Ok(sheet);
            }
        }

        if let Some(keyword) = &self.fallback_keyword {
            for sheet in workbook.sheets() {
                if sheet.to_text().contains(keyword.as_str()) {
                    debug!(sheet = %sheet.name, keyword = %keyword, "fallback keyword matched");
                    return Ok(sheet);
                }
            }
        }

        Err(ExtractError::sheet_not_found(&self.candidates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(name: &str, text: &str) -> Sheet {
        Sheet {
            name: name.to_string(),
            rows: vec![vec![text.to_string()]],
        }
    }

    fn workbook() -> Workbook {
        Workbook::from_sheets(vec![
            sheet("Summary", "totals only"),
            sheet("Antalis", "Valeo Electric Poland"),
        ])
    }

    #[test]
    fn test_first_existing_candidate_wins() {
        let locator = SheetLocator::new(
            vec!["Pick-up order ATK".to_string(), "Antalis".to_string()],
            None,
        );
        assert_eq!(locator.locate(&workbook()).unwrap().name, "Antalis");
    }

    #[test]
    fn test_keyword_fallback_scans_sheet_text() {
        let locator = SheetLocator::new(
            vec!["Missing".to_string()],
            Some("Valeo Electric".to_string()),
        );
        assert_eq!(locator.locate(&workbook()).unwrap().name, "Antalis");
    }

    #[test]
    fn test_keyword_is_case_sensitive() {
        let locator = SheetLocator::new(vec![], Some("valeo electric".to_string()));
        assert!(locator.locate(&workbook()).is_err());
    }

    #[test]
    fn test_no_match_without_fallback() {
        let locator = SheetLocator::new(vec!["Missing".to_string()], None);
        let err = locator.locate(&workbook()).unwrap_err();
        assert_eq!(err.error_code(), "SHEET_NOT_FOUND");
    }
}
