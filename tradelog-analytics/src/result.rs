//! AnalysisResult: everything one analysis request produced, ready to export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tradelog_core::TimeWindow;

use crate::loader::LoadedJournal;
use crate::stats::{compute_windows, TradeStats};
use crate::tax::TaxReport;

/// Current schema version for exported artifacts.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub generated_at: DateTime<Utc>,
    pub as_of: DateTime<Utc>,
    pub dataset_hash: String,
    pub record_count: usize,
    pub skipped_records: usize,
    pub stats: Vec<TradeStats>,
    pub tax: Option<TaxReport>,
}

impl AnalysisResult {
    /// Run the statistics engine for each window and, when a year is given,
    /// the tax report.
    pub fn analyze(
        journal: &LoadedJournal,
        windows: &[TimeWindow],
        tax_year: Option<i32>,
        as_of: DateTime<Utc>,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            as_of,
            dataset_hash: journal.dataset_hash.clone(),
            record_count: journal.records.len(),
            skipped_records: journal.skipped,
            stats: compute_windows(&journal.records, windows, as_of),
            tax: tax_year.map(|year| TaxReport::generate(&journal.records, year)),
        }
    }

    pub fn windows(&self) -> Vec<TimeWindow> {
        self.stats.iter().map(|s| s.window).collect()
    }
}
