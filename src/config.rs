use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;

use crate::pipeline::columns::HeaderSpec;
use crate::pipeline::derive::source;
use crate::pipeline::schema::columns;

/// Case handling for header token matching. The two source layout families
/// disagree on this, so it stays an explicit option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaseMode {
    Sensitive,
    Insensitive,
}

/// Input format for overlay-supplied dates; deployment-specific.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateInputFormat {
    /// `DD.MM.YYYY`
    DotDmy,
    /// `DD/MM/YYYY`
    SlashDmy,
}

impl DateInputFormat {
    pub fn pattern(&self) -> &'static str {
        match self {
            Self::DotDmy => "%d.%m.%Y",
            Self::SlashDmy => "%d/%m/%Y",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::DotDmy => "DD.MM.YYYY",
            Self::SlashDmy => "DD/MM/YYYY",
        }
    }
}

/// How the quantity and product fields are derived from mapped columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DerivationVariant {
    /// Quantity verbatim from a details column, product text composed from
    /// description + location.
    Composite,
    /// Quantity = pack-count × loop-size, description already usable as the
    /// product text.
    Multiplicative,
}

/// Everything one pipeline run needs to know about a source layout family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub sheet_candidates: Vec<String>,
    pub sheet_fallback_keyword: Option<String>,
    pub header_tokens: Vec<String>,
    pub header_case: CaseMode,
    pub two_row_headers: bool,
    pub header_spec: HeaderSpec,
    pub derivation: DerivationVariant,
    pub reference_column: String,
    pub quantity_column: String,
    pub exclusion_literal: String,
    pub noise_fragments: Vec<String>,
    pub placeholder_columns: Vec<String>,
    pub final_columns: Vec<String>,
    pub default_client: String,
    pub client_keyword: Option<String>,
    pub client_scan_column: usize,
    pub expected_date_keyword: Option<String>,
    pub date_input_format: DateInputFormat,
}

impl PipelineConfig {
    /// Profile for the Antalis pick-up order layout: single-row headers,
    /// quantity carried verbatim in a details column.
    pub fn antalis() -> Self {
        Self {
            sheet_candidates: vec!["Antalis".to_string(), "Pick-up order ATK".to_string()],
            sheet_fallback_keyword: Some("Valeo Electric".to_string()),
            header_tokens: vec![
                "Reference".to_string(),
                "Description".to_string(),
                "Unit".to_string(),
            ],
            header_case: CaseMode::Sensitive,
            two_row_headers: false,
            header_spec: HeaderSpec::new()
                .with(columns::ORDER_REF, &["Reference", "REFERENCJA"])
                .with(source::DESCRIPTION, &["Description", "OPIS"])
                .with(source::LOCATION, &["Location"])
                .with(source::DETAILS, &["Details"]),
            derivation: DerivationVariant::Composite,
            reference_column: columns::ORDER_REF.to_string(),
            quantity_column: columns::QUANTITY.to_string(),
            exclusion_literal: "Transportation mode".to_string(),
            noise_fragments: noise_fragments(),
            placeholder_columns: columns::placeholders(),
            final_columns: columns::final_order(),
            default_client: "Valeo".to_string(),
            client_keyword: Some("Valeo Electric".to_string()),
            client_scan_column: 3,
            expected_date_keyword: Some("Pick-up".to_string()),
            date_input_format: DateInputFormat::DotDmy,
        }
    }

    /// Profile for the delivery-schedule layout: two-row merged headers,
    /// quantity computed from standard pack size and loop size.
    pub fn std_pack() -> Self {
        Self {
            sheet_candidates: vec![
                "Delivery schedule".to_string(),
                "Zamówienia".to_string(),
                "Sheet1".to_string(),
            ],
            sheet_fallback_keyword: None,
            header_tokens: vec![
                "Reference".to_string(),
                "Referencja".to_string(),
                "Description".to_string(),
                "Ordered in Std Pack".to_string(),
                "Unit".to_string(),
                "Loop Size".to_string(),
            ],
            header_case: CaseMode::Sensitive,
            two_row_headers: true,
            header_spec: HeaderSpec::new()
                .with(columns::ORDER_REF, &["Reference", "Referencja"])
                .with(columns::PRODUCT, &["Description", "OPIS"])
                .with(source::STD_PACK, &["Ordered in Std Pack"])
                .with(source::LOOP_SIZE, &["Loop Size"]),
            derivation: DerivationVariant::Multiplicative,
            reference_column: columns::ORDER_REF.to_string(),
            quantity_column: columns::QUANTITY.to_string(),
            exclusion_literal: "Transportation mode".to_string(),
            noise_fragments: noise_fragments(),
            placeholder_columns: columns::placeholders(),
            final_columns: columns::final_order(),
            default_client: "Valeo".to_string(),
            client_keyword: None,
            client_scan_column: 3,
            expected_date_keyword: None,
            date_input_format: DateInputFormat::DotDmy,
        }
    }

    /// Look up a built-in profile by name.
    pub fn profile(name: &str) -> Option<Self> {
        match name {
            "antalis" => Some(Self::antalis()),
            "std-pack" | "std_pack" => Some(Self::std_pack()),
            _ => None,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::antalis()
    }
}

fn noise_fragments() -> Vec<String> {
    [
        "Transportation mode",
        "Supplier Contact signature",
        "for the promise",
        "____________________",
    ]
    .iter()
    .map(|f| f.to_string())
    .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Name of the built-in pipeline profile to run.
    pub profile: String,
    pub upload_dir: String,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let config = Config::builder()
            // Start with default values
            .add_source(File::with_name("config/default").required(false))
            // Add environment-specific config
            .add_source(
                File::with_name(&format!(
                    "config/{}",
                    env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into())
                ))
                .required(false),
            )
            // Add local config (gitignored)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with ORDERNORM prefix
            .add_source(Environment::with_prefix("ORDERNORM").separator("__"));

        config.build()?.try_deserialize()
    }

    pub fn pipeline(&self) -> Option<PipelineConfig> {
        PipelineConfig::profile(&self.profile)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profile: "antalis".to_string(),
            upload_dir: "uploads/".to_string(),
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "text".to_string(),
                file_path: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_lookup() {
        assert!(PipelineConfig::profile("antalis").is_some());
        assert!(PipelineConfig::profile("std-pack").is_some());
        assert!(PipelineConfig::profile("unknown").is_none());
    }

    #[test]
    fn test_profiles_share_the_output_schema() {
        let antalis = PipelineConfig::antalis();
        let std_pack = PipelineConfig::std_pack();
        assert_eq!(antalis.final_columns, std_pack.final_columns);
        assert_eq!(antalis.final_columns.len(), 11);
    }

    #[test]
    fn test_date_format_patterns() {
        assert_eq!(DateInputFormat::DotDmy.pattern(), "%d.%m.%Y");
        assert_eq!(DateInputFormat::SlashDmy.pattern(), "%d/%m/%Y");
    }
}
