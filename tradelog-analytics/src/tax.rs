//! Tax lot report: closed trades of one calendar year as gain/loss lots.
//!
//! Every lot is reported as short-term and long-term totals are always zero.
//! Holding duration is not classified; a trade held for years still lands in
//! the short-term bucket. Treat the long-term fields as placeholders.

use serde::{Deserialize, Serialize};
use tradelog_core::dates::year_range;
use tradelog_core::{dated, DatedTrade, TradeRecord};

/// Holding-period label attached to every lot.
pub const SHORT_TERM: &str = "Short-term";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxSummary {
    pub total_trades: usize,
    pub short_term_gains: f64,
    pub short_term_losses: f64,
    pub net_short_term: f64,
    pub long_term_gains: f64,
    pub long_term_losses: f64,
    pub net_long_term: f64,
    pub total_net: f64,
}

/// One row of the per-trade listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxEntry {
    pub symbol: String,
    pub description: String,
    pub date_acquired: String,
    pub date_sold: String,
    pub proceeds: f64,
    pub cost_basis: f64,
    pub gain_loss: f64,
    pub holding_period: String,
    pub wash_sale: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxReport {
    pub year: i32,
    pub summary: TaxSummary,
    pub entries: Vec<TaxEntry>,
}

impl TaxReport {
    /// Build the report for `year`. Never fails: a year with no closed trades
    /// (or a year outside the calendar range) yields an empty report.
    pub fn generate(records: &[TradeRecord], year: i32) -> Self {
        let lots: Vec<DatedTrade<'_>> = match year_range(year) {
            Ok(days) => dated(records)
                .filter(|t| t.record.is_closed() && days.contains(&t.day))
                .collect(),
            Err(err) => {
                tracing::warn!(%err, "tax year out of range, reporting no lots");
                Vec::new()
            }
        };

        tracing::debug!(year, lots = lots.len(), "generated tax report");

        Self {
            year,
            summary: summarize(&lots),
            entries: lots.iter().map(|t| TaxEntry::from_record(t.record)).collect(),
        }
    }

    /// No qualifying trades for the year.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TaxEntry {
    pub fn from_record(record: &TradeRecord) -> Self {
        let quantity = record.effective_quantity();
        Self {
            symbol: record.symbol.clone(),
            description: format!("{} {} shares", record.side, record.quantity.unwrap_or(0.0)),
            date_acquired: record.acquired_on().to_string(),
            date_sold: record.sold_on().to_string(),
            proceeds: record.exit_price.map_or(0.0, |p| p * quantity),
            cost_basis: record.entry_price.map_or(0.0, |p| p * quantity),
            gain_loss: record.pnl,
            holding_period: SHORT_TERM.to_string(),
            wash_sale: false,
        }
    }
}

/// Gains and losses by `pnl` sign, regardless of status.
fn summarize(lots: &[DatedTrade<'_>]) -> TaxSummary {
    let short_term_gains: f64 = lots.iter().map(|t| t.pnl()).filter(|&p| p > 0.0).sum();
    let short_term_losses: f64 = lots
        .iter()
        .map(|t| t.pnl())
        .filter(|&p| p < 0.0)
        .map(f64::abs)
        .sum();
    let net_short_term = short_term_gains - short_term_losses;

    TaxSummary {
        total_trades: lots.len(),
        short_term_gains,
        short_term_losses,
        net_short_term,
        long_term_gains: 0.0,
        long_term_losses: 0.0,
        net_long_term: 0.0,
        total_net: net_short_term,
    }
}

/// Free-function form of [`TaxReport::generate`].
pub fn generate_tax_report(records: &[TradeRecord], year: i32) -> TaxReport {
    TaxReport::generate(records, year)
}
