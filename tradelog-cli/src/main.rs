//! TradeLog CLI: performance statistics and tax reports from a journal export.
//!
//! Commands:
//! - `stats` prints statistics for one window (or all four) and optionally exports them
//! - `tax` prints the short-term gain/loss report for a calendar year
//! - `report` writes the full artifact set (JSON, CSV, Markdown, manifest)

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tradelog_analytics::reporting::ArtifactManager;
use tradelog_analytics::{
    export_run_with_report, load_path, AnalysisConfig, AnalysisResult, ExportFormat, LoadedJournal,
    TaxReport, TradeStats,
};
use tradelog_core::{parse_timestamp, TimeWindow};

#[derive(Parser)]
#[command(
    name = "tradelog",
    about = "Trade journal performance analytics and tax reports"
)]
struct Cli {
    /// Verbose logging (debug level unless RUST_LOG is set).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    /// Path to a TOML analysis config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute performance statistics for a trailing window.
    Stats {
        /// Journal export (.json or .csv).
        journal: PathBuf,

        /// Window: 7d, 30d, 90d or all.
        #[arg(long)]
        window: Option<TimeWindow>,

        /// Compute all four windows instead of one.
        #[arg(long, default_value_t = false)]
        all_windows: bool,

        /// Anchor for trailing windows (ISO-8601). Defaults to now.
        #[arg(long)]
        as_of: Option<String>,

        /// Also export stats artifacts into this directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Export format: json, csv or both.
        #[arg(long)]
        format: Option<ExportFormat>,
    },
    /// Build the gain/loss report for a calendar year.
    Tax {
        /// Journal export (.json or .csv).
        journal: PathBuf,

        /// Calendar year. Falls back to `tax.year` in the config file.
        #[arg(long)]
        year: Option<i32>,

        /// Also export the report into this directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Export format: json, csv or both.
        #[arg(long)]
        format: Option<ExportFormat>,
    },
    /// Write statistics, tax report, Markdown summary and manifest.
    Report {
        /// Journal export (.json or .csv).
        journal: PathBuf,

        /// Window: 7d, 30d, 90d or all. Ignored with --all-windows.
        #[arg(long)]
        window: Option<TimeWindow>,

        /// Compute all four windows instead of one.
        #[arg(long, default_value_t = false)]
        all_windows: bool,

        /// Calendar year for the tax section.
        #[arg(long)]
        year: Option<i32>,

        /// Anchor for trailing windows (ISO-8601). Defaults to now.
        #[arg(long)]
        as_of: Option<String>,

        /// Output directory. Falls back to `export.output_dir` in the config file.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Export format: json, csv or both.
        #[arg(long)]
        format: Option<ExportFormat>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => AnalysisConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };
    tracing::debug!(?config, "resolved analysis config");

    match cli.command {
        Commands::Stats {
            journal,
            window,
            all_windows,
            as_of,
            output_dir,
            format,
        } => {
            let windows = resolve_windows(&config, window, all_windows);
            let as_of = resolve_as_of(&config, as_of.as_deref())?;
            let format = format.unwrap_or(config.export.format);
            run_stats_cmd(&journal, &windows, as_of, output_dir.as_deref(), format)
        }
        Commands::Tax {
            journal,
            year,
            output_dir,
            format,
        } => {
            let Some(year) = year.or(config.tax.year) else {
                bail!("a tax year is required (--year or [tax] year in the config file)");
            };
            let format = format.unwrap_or(config.export.format);
            run_tax_cmd(&journal, year, output_dir.as_deref(), format)
        }
        Commands::Report {
            journal,
            window,
            all_windows,
            year,
            as_of,
            output_dir,
            format,
        } => {
            let windows = resolve_windows(&config, window, all_windows);
            let as_of = resolve_as_of(&config, as_of.as_deref())?;
            let year = year.or(config.tax.year);
            let output_dir = output_dir.unwrap_or_else(|| config.export.output_dir.clone());
            let format = format.unwrap_or(config.export.format);
            run_report_cmd(&journal, &windows, year, as_of, &output_dir, format)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_windows(config: &AnalysisConfig, window: Option<TimeWindow>, all: bool) -> Vec<TimeWindow> {
    if all {
        TimeWindow::EVERY.to_vec()
    } else {
        vec![window.unwrap_or(config.stats.window)]
    }
}

fn resolve_as_of(config: &AnalysisConfig, flag: Option<&str>) -> Result<DateTime<Utc>> {
    if let Some(raw) = flag {
        return parse_timestamp(raw).with_context(|| format!("invalid --as-of '{raw}'"));
    }
    Ok(config.as_of()?.unwrap_or_else(Utc::now))
}

fn load_journal(path: &Path) -> Result<LoadedJournal> {
    let journal = load_path(path)?;
    tracing::debug!(
        records = journal.records.len(),
        skipped = journal.skipped,
        hash = %journal.dataset_hash,
        "journal loaded"
    );
    if journal.skipped > 0 {
        eprintln!(
            "WARNING: skipped {} malformed journal entr{}",
            journal.skipped,
            if journal.skipped == 1 { "y" } else { "ies" }
        );
    }
    Ok(journal)
}

fn run_stats_cmd(
    journal_path: &Path,
    windows: &[TimeWindow],
    as_of: DateTime<Utc>,
    output_dir: Option<&Path>,
    format: ExportFormat,
) -> Result<()> {
    let journal = load_journal(journal_path)?;
    let result = AnalysisResult::analyze(&journal, windows, None, as_of);

    for stats in &result.stats {
        print_stats(stats);
    }

    if let Some(dir) = output_dir {
        let manager = ArtifactManager::new(dir, format)?;
        for stats in &result.stats {
            let paths = manager.save_stats(stats)?;
            println!("Stats for {} saved to: {}", stats.window, paths.dir.display());
        }
    }

    Ok(())
}

fn run_tax_cmd(
    journal_path: &Path,
    year: i32,
    output_dir: Option<&Path>,
    format: ExportFormat,
) -> Result<()> {
    let journal = load_journal(journal_path)?;
    let report = TaxReport::generate(&journal.records, year);

    print_tax(&report);

    if let Some(dir) = output_dir {
        if report.is_empty() {
            return Ok(());
        }
        let manager = ArtifactManager::new(dir, format)?;
        let paths = manager.save_tax(&report)?;
        for path in paths.json.iter().chain(paths.csv.iter()) {
            println!("Saved: {}", path.display());
        }
    }

    Ok(())
}

fn run_report_cmd(
    journal_path: &Path,
    windows: &[TimeWindow],
    year: Option<i32>,
    as_of: DateTime<Utc>,
    output_dir: &Path,
    format: ExportFormat,
) -> Result<()> {
    let journal = load_journal(journal_path)?;
    let result = AnalysisResult::analyze(&journal, windows, year, as_of);

    for stats in &result.stats {
        print_stats(stats);
    }
    if let Some(tax) = &result.tax {
        print_tax(tax);
    }

    let paths = export_run_with_report(output_dir, &result, format, true)?;
    println!("Artifacts saved to: {}", output_dir.display());
    if let Some(report) = paths.report_markdown {
        println!("Report: {}", report.display());
    }

    Ok(())
}

fn print_stats(stats: &TradeStats) {
    println!();
    println!("=== Trade Statistics ({}) ===", stats.window);
    println!("As of:          {}", stats.as_of.format("%Y-%m-%d %H:%M UTC"));
    println!(
        "Trades:         {} closed ({} W / {} L / {} BE), {} open",
        stats.total_trades,
        stats.winning_trades,
        stats.losing_trades,
        stats.breakeven_trades,
        stats.open_trades
    );
    if !stats.has_trades() {
        println!("No closed trades in this window.");
        println!();
        return;
    }
    println!();
    println!("--- Performance ---");
    println!("Total P&L:      ${:.2}", stats.total_pnl);
    println!("Win Rate:       {:.2}%", stats.win_rate);
    println!("Expectancy:     ${:.2}", stats.expectancy);
    println!("Profit Factor:  {}", stats.profit_factor);
    println!("Avg Win:        ${:.2}", stats.avg_win);
    println!("Avg Loss:       ${:.2}", stats.avg_loss);
    println!("Biggest Win:    ${:.2}", stats.biggest_win);
    println!("Biggest Loss:   ${:.2}", stats.biggest_loss);
    println!("Avg Trade:      ${:.2}", stats.avg_trade_size);
    println!("Max Win Streak: {}", stats.max_win_streak);
    println!("Max Loss Streak:{}", stats.max_loss_streak);

    if !stats.strategy_breakdown.is_empty() {
        println!();
        println!("{:<20} {:>7} {:>9} {:>12}", "Strategy", "Trades", "Win Rate", "P&L");
        println!("{}", "-".repeat(51));
        for group in &stats.strategy_breakdown {
            println!(
                "{:<20} {:>7} {:>8.1}% {:>12.2}",
                group.strategy, group.trades, group.win_rate, group.pnl
            );
        }
    }

    println!();
    println!("{:<5} {:>7} {:>12}", "Day", "Trades", "P&L");
    println!("{}", "-".repeat(26));
    for day in &stats.weekday_breakdown {
        println!("{:<5} {:>7} {:>12.2}", day.day, day.trades, day.pnl);
    }
    println!();
}

fn print_tax(report: &TaxReport) {
    println!();
    println!("=== Tax Report {} ===", report.year);
    if report.is_empty() {
        println!("No trades found for {}.", report.year);
        println!();
        return;
    }
    let s = &report.summary;
    println!("Lots:               {}", s.total_trades);
    println!("Short-term Gains:   ${:.2}", s.short_term_gains);
    println!("Short-term Losses:  ${:.2}", s.short_term_losses);
    println!("Net Short-term:     ${:.2}", s.net_short_term);
    println!("Net Long-term:      ${:.2}", s.net_long_term);
    println!("Total Net:          ${:.2}", s.total_net);
    println!();
    println!(
        "{:<8} {:<22} {:<12} {:<12} {:>12} {:>12} {:>12}",
        "Symbol", "Description", "Acquired", "Sold", "Proceeds", "Cost Basis", "Gain/Loss"
    );
    println!("{}", "-".repeat(96));
    for entry in &report.entries {
        println!(
            "{:<8} {:<22} {:<12} {:<12} {:>12.2} {:>12.2} {:>12.2}",
            entry.symbol,
            entry.description,
            short_date(&entry.date_acquired),
            short_date(&entry.date_sold),
            entry.proceeds,
            entry.cost_basis,
            entry.gain_loss
        );
    }
    println!();
    println!("NOTE: holding periods are not classified; every lot is reported as short-term.");
    println!();
}

fn short_date(raw: &str) -> &str {
    raw.get(..10).unwrap_or(raw)
}
