//! Artifact manager for persisting analysis outputs.

mod manifest;
mod stats;
mod tax;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::ExportFormat;
use crate::result::AnalysisResult;
use crate::stats::TradeStats;
use crate::tax::TaxReport;

pub use manifest::RunManifest;

/// Files written for one statistics window.
#[derive(Debug, Clone, Default)]
pub struct StatsArtifactPaths {
    pub dir: PathBuf,
    pub stats_json: Option<PathBuf>,
    pub equity_csv: Option<PathBuf>,
    pub daily_csv: Option<PathBuf>,
    pub strategies_csv: Option<PathBuf>,
    pub weekdays_csv: Option<PathBuf>,
}

/// Files written for the tax report.
#[derive(Debug, Clone, Default)]
pub struct TaxArtifactPaths {
    pub json: Option<PathBuf>,
    pub csv: Option<PathBuf>,
}

/// Artifact paths returned after export.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub manifest: PathBuf,
    pub stats: Vec<StatsArtifactPaths>,
    pub tax: Option<TaxArtifactPaths>,
    pub report_markdown: Option<PathBuf>,
}

/// Manages writing all artifacts for an analysis run.
#[derive(Debug, Clone)]
pub struct ArtifactManager {
    output_dir: PathBuf,
    format: ExportFormat,
}

impl ArtifactManager {
    pub fn new(output_dir: impl AsRef<Path>, format: ExportFormat) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&output_dir)
            .context("Failed to create artifact output directory")?;
        Ok(Self { output_dir, format })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Save the manifest, every statistics window and the tax report.
    pub fn save_run(&self, result: &AnalysisResult) -> Result<ArtifactPaths> {
        let manifest_path = self.output_dir.join("manifest.json");
        manifest::write_manifest(&manifest_path, result)?;

        let stats = result
            .stats
            .iter()
            .map(|s| self.save_stats(s))
            .collect::<Result<Vec<_>>>()?;

        let tax = result.tax.as_ref().map(|t| self.save_tax(t)).transpose()?;

        tracing::info!(dir = %self.output_dir.display(), "saved analysis artifacts");

        Ok(ArtifactPaths {
            manifest: manifest_path,
            stats,
            tax,
            report_markdown: None,
        })
    }

    /// Save one window's statistics under `stats-<window>/`.
    pub fn save_stats(&self, stats: &TradeStats) -> Result<StatsArtifactPaths> {
        let dir = self.output_dir.join(format!("stats-{}", stats.window));
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create stats directory {}", dir.display()))?;

        let mut paths = StatsArtifactPaths {
            dir: dir.clone(),
            ..Default::default()
        };

        if self.format.json() {
            let path = dir.join("stats.json");
            stats::write_stats_json(&path, stats)?;
            paths.stats_json = Some(path);
        }

        if self.format.csv() {
            let equity = dir.join("equity.csv");
            stats::write_equity_csv(&equity, stats)?;
            let daily = dir.join("daily.csv");
            stats::write_daily_csv(&daily, stats)?;
            let strategies = dir.join("strategies.csv");
            stats::write_strategies_csv(&strategies, stats)?;
            let weekdays = dir.join("weekdays.csv");
            stats::write_weekdays_csv(&weekdays, stats)?;

            paths.equity_csv = Some(equity);
            paths.daily_csv = Some(daily);
            paths.strategies_csv = Some(strategies);
            paths.weekdays_csv = Some(weekdays);
        }

        Ok(paths)
    }

    /// Save the tax report as `tax_<year>.json` / `tax_<year>.csv`.
    pub fn save_tax(&self, report: &TaxReport) -> Result<TaxArtifactPaths> {
        let mut paths = TaxArtifactPaths::default();

        if self.format.json() {
            let path = self.output_dir.join(format!("tax_{}.json", report.year));
            tax::write_tax_json(&path, report)?;
            paths.json = Some(path);
        }

        if self.format.csv() {
            let path = self.output_dir.join(format!("tax_{}.csv", report.year));
            tax::write_tax_csv(&path, report)?;
            paths.csv = Some(path);
        }

        Ok(paths)
    }
}
