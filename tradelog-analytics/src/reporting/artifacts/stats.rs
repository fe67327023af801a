//! Statistics export (JSON bundle plus one CSV per series).

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::stats::TradeStats;

pub fn write_stats_json(path: &Path, stats: &TradeStats) -> Result<()> {
    let json = serde_json::to_string_pretty(stats).context("Failed to serialize trade statistics")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write stats JSON {}", path.display()))?;
    Ok(())
}

pub fn write_equity_csv(path: &Path, stats: &TradeStats) -> Result<()> {
    write_rows(path, &stats.equity_curve)
}

pub fn write_daily_csv(path: &Path, stats: &TradeStats) -> Result<()> {
    write_rows(path, &stats.daily_pnl)
}

pub fn write_strategies_csv(path: &Path, stats: &TradeStats) -> Result<()> {
    write_rows(path, &stats.strategy_breakdown)
}

pub fn write_weekdays_csv(path: &Path, stats: &TradeStats) -> Result<()> {
    write_rows(path, &stats.weekday_breakdown)
}

pub(crate) fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV {}", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write CSV row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush CSV {}", path.display()))?;
    Ok(())
}
