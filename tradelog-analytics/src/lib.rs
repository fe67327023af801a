//! TradeLog Analytics: performance statistics and tax lot reporting.
//!
//! This crate builds on `tradelog-core` to provide:
//! - The statistics engine (win rate, expectancy, profit factor, streaks,
//!   equity curve, daily / strategy / weekday breakdowns)
//! - The tax lot report for one calendar year
//! - Journal loading from JSON/CSV exports
//! - TOML analysis config
//! - Artifact export (JSON, CSV, Markdown, manifest)
//!
//! The statistics engine and tax report are pure: records in, plain
//! serializable structures out. Only the loader and exporters touch the
//! filesystem.

pub mod config;
pub mod loader;
pub mod reporting;
pub mod result;
pub mod stats;
pub mod tax;

pub use config::{AnalysisConfig, ConfigError, ExportFormat};
pub use loader::{load_csv, load_json, load_path, LoadError, LoadedJournal};
pub use reporting::export::export_run_with_report;
pub use result::AnalysisResult;
pub use stats::{
    compute_stats, compute_windows, DailyPnl, EquityPoint, ProfitFactor, StrategyStats,
    TradeStats, WeekdayPnl,
};
pub use tax::{generate_tax_report, TaxEntry, TaxReport, TaxSummary};
