//! Tax report export (JSON report, CSV lot listing).

use anyhow::{Context, Result};
use std::path::Path;

use super::stats::write_rows;
use crate::tax::TaxReport;

pub fn write_tax_json(path: &Path, report: &TaxReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize tax report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write tax JSON {}", path.display()))?;
    Ok(())
}

/// One row per lot. A year without lots produces an empty file.
pub fn write_tax_csv(path: &Path, report: &TaxReport) -> Result<()> {
    write_rows(path, &report.entries)
}
