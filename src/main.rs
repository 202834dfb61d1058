//! Thin command-line driver.
//!
//! Plays the role of the external collaborator for local use: takes a
//! workbook path, runs the configured pipeline profile, and prints the
//! normalized table as semicolon-delimited text on stdout.

use anyhow::{bail, Context, Result};
use tracing::warn;

use ordernorm::{export, logging, AppConfig, Pipeline};

fn main() -> Result<()> {
    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging)?;

    let path = std::env::args()
        .nth(1)
        .context("usage: ordernorm <workbook.xlsx>")?;
    if !export::is_allowed_upload(&path) {
        bail!("unsupported file type: {path} (expected .xlsx or .xls)");
    }

    let pipeline_config = config
        .pipeline()
        .with_context(|| format!("unknown pipeline profile '{}'", config.profile))?;
    let pipeline = Pipeline::new(pipeline_config);

    let extraction = pipeline.process_path(&path)?;
    for warning in &extraction.warnings {
        warn!(file = %extraction.filename, %warning, "extraction warning");
    }

    print!("{}", export::to_delimited(&extraction.table)?);
    Ok(())
}
