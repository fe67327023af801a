//! Markdown report generator.

use crate::result::AnalysisResult;
use crate::stats::TradeStats;
use crate::tax::TaxReport;

/// Number of strategies listed per window.
const TOP_STRATEGIES: usize = 5;

pub struct MarkdownReportGenerator;

impl MarkdownReportGenerator {
    pub fn generate(&self, result: &AnalysisResult) -> String {
        let mut report = format!(
            "# TradeLog Performance Report\n\n\
As of: {}\n\n\
Journal: {} records ({} skipped), dataset `{}`\n",
            result.as_of.format("%Y-%m-%d %H:%M UTC"),
            result.record_count,
            result.skipped_records,
            short_hash(&result.dataset_hash),
        );

        if !result.stats.is_empty() {
            report.push_str("\n## Summary\n\n");
            report.push_str(
                "| Window | Trades | Win Rate | Total P&L | Expectancy | Profit Factor | Max Win Streak | Max Loss Streak |\n",
            );
            report.push_str(
                "|--------|--------|----------|-----------|------------|---------------|----------------|-----------------|\n",
            );
            for stats in &result.stats {
                report.push_str(&format!(
                    "| {} | {} | {:.1}% | ${:+.2} | ${:+.2} | {} | {} | {} |\n",
                    stats.window,
                    stats.total_trades,
                    stats.win_rate,
                    stats.total_pnl,
                    stats.expectancy,
                    stats.profit_factor,
                    stats.max_win_streak,
                    stats.max_loss_streak,
                ));
            }

            for stats in &result.stats {
                push_window_detail(&mut report, stats);
            }
        }

        if let Some(tax) = &result.tax {
            push_tax_section(&mut report, tax);
        }

        report
    }
}

fn push_window_detail(report: &mut String, stats: &TradeStats) {
    report.push_str(&format!("\n## Window {}\n\n", stats.window));

    if !stats.has_trades() {
        report.push_str("No closed trades in this window.\n");
        return;
    }

    report.push_str(&format!(
        "- Avg Win: ${:.2}\n\
- Avg Loss: ${:.2}\n\
- Biggest Win: ${:+.2}\n\
- Biggest Loss: ${:+.2}\n\
- Open Trades: {}\n",
        stats.avg_win, stats.avg_loss, stats.biggest_win, stats.biggest_loss, stats.open_trades
    ));

    report.push_str("\n### Top Strategies\n");
    report.push_str("| Strategy | Trades | Win Rate | P&L |\n");
    report.push_str("|----------|--------|----------|-----|\n");
    for group in stats.strategy_breakdown.iter().take(TOP_STRATEGIES) {
        report.push_str(&format!(
            "| {} | {} | {:.1}% | ${:+.2} |\n",
            group.strategy, group.trades, group.win_rate, group.pnl
        ));
    }

    report.push_str("\n### By Weekday\n");
    report.push_str("| Day | Trades | P&L |\n");
    report.push_str("|-----|--------|-----|\n");
    for day in &stats.weekday_breakdown {
        report.push_str(&format!("| {} | {} | ${:+.2} |\n", day.day, day.trades, day.pnl));
    }
}

fn push_tax_section(report: &mut String, tax: &TaxReport) {
    report.push_str(&format!("\n## Tax Report {}\n\n", tax.year));

    if tax.is_empty() {
        report.push_str(&format!("No closed trades found for {}.\n", tax.year));
        return;
    }

    let s = &tax.summary;
    report.push_str(&format!(
        "- Lots: {}\n\
- Short-term Gains: ${:.2}\n\
- Short-term Losses: ${:.2}\n\
- Net Short-term: ${:+.2}\n\
- Total Net: ${:+.2}\n",
        s.total_trades, s.short_term_gains, s.short_term_losses, s.net_short_term, s.total_net
    ));
    report.push_str("\nLong-term classification is not performed; every lot is reported as short-term.\n");
}

fn short_hash(hash: &str) -> &str {
    hash.get(..12).unwrap_or(hash)
}
