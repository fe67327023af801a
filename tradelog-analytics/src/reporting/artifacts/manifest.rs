//! Analysis manifest export (JSON).

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tradelog_core::TimeWindow;

use crate::result::{AnalysisResult, SCHEMA_VERSION};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunManifest {
    pub schema_version: u32,
    pub tool_version: String,
    pub generated_at: DateTime<Utc>,
    pub as_of: DateTime<Utc>,
    pub windows: Vec<TimeWindow>,
    pub tax_year: Option<i32>,
    pub dataset_hash: String,
    pub record_count: usize,
    pub skipped_records: usize,
}

impl RunManifest {
    pub fn from_result(result: &AnalysisResult) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: result.generated_at,
            as_of: result.as_of,
            windows: result.windows(),
            tax_year: result.tax.as_ref().map(|t| t.year),
            dataset_hash: result.dataset_hash.clone(),
            record_count: result.record_count,
            skipped_records: result.skipped_records,
        }
    }
}

pub fn write_manifest(path: &Path, result: &AnalysisResult) -> Result<()> {
    let manifest = RunManifest::from_result(result);
    let json = serde_json::to_string_pretty(&manifest).context("Failed to serialize run manifest")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write manifest to {}", path.display()))?;
    Ok(())
}
