//! TradeRecord: one journal entry as supplied by the trade-journal store.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::dates::{parse_local_timestamp, parse_timestamp};

/// Bucket label for records without a strategy.
pub const NO_STRATEGY: &str = "No Strategy";

/// Lifecycle status of a journal entry.
///
/// `Open` entries are excluded from every closed-trade computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Open,
    Win,
    Loss,
    Breakeven,
}

impl TradeStatus {
    pub fn is_closed(self) -> bool {
        self != TradeStatus::Open
    }
}

/// A single trade journal entry.
///
/// Dates are kept as the raw strings the journal supplied. They are parsed
/// lazily so that a malformed date excludes the record from analysis instead
/// of failing the whole load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    // ── Timing ──
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_date: Option<String>,

    // ── Identification ──
    #[serde(default, deserialize_with = "null_as_empty")]
    pub symbol: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub side: String,
    pub status: TradeStatus,

    // ── PnL and size ──
    pub pnl: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_price: Option<f64>,

    // ── Cohort ──
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
}

/// Missing and `null` both read as an empty string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl TradeRecord {
    /// Minimal record; optional fields start empty.
    pub fn new(
        date: impl Into<String>,
        symbol: impl Into<String>,
        status: TradeStatus,
        pnl: f64,
    ) -> Self {
        Self {
            date: date.into(),
            entry_date: None,
            exit_date: None,
            symbol: symbol.into(),
            side: String::new(),
            status,
            pnl,
            quantity: None,
            entry_price: None,
            exit_price: None,
            strategy: None,
        }
    }

    pub fn with_side(mut self, side: impl Into<String>) -> Self {
        self.side = side.into();
        self
    }

    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = Some(strategy.into());
        self
    }

    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_prices(mut self, entry: Option<f64>, exit: Option<f64>) -> Self {
        self.entry_price = entry;
        self.exit_price = exit;
        self
    }

    pub fn with_holding_dates(
        mut self,
        entry: Option<impl Into<String>>,
        exit: Option<impl Into<String>>,
    ) -> Self {
        self.entry_date = entry.map(Into::into);
        self.exit_date = exit.map(Into::into);
        self
    }

    pub fn is_closed(&self) -> bool {
        self.status.is_closed()
    }

    /// Parsed log date, or `None` when the journal's date string is malformed.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.date).ok()
    }

    /// Log date with the offset the journal wrote it in.
    pub fn local_timestamp(&self) -> Option<DateTime<FixedOffset>> {
        parse_local_timestamp(&self.date).ok()
    }

    /// Strategy label with absent or blank values folded into [`NO_STRATEGY`].
    pub fn strategy_label(&self) -> &str {
        match self.strategy.as_deref() {
            Some(s) if !s.trim().is_empty() => s,
            _ => NO_STRATEGY,
        }
    }

    /// Date the position was opened, falling back to the log date.
    pub fn acquired_on(&self) -> &str {
        self.entry_date.as_deref().unwrap_or(&self.date)
    }

    /// Date the position was closed, falling back to the log date.
    pub fn sold_on(&self) -> &str {
        self.exit_date.as_deref().unwrap_or(&self.date)
    }

    /// Share/contract count used for proceeds and cost basis.
    pub fn effective_quantity(&self) -> f64 {
        self.quantity.unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trade() -> TradeRecord {
        TradeRecord::new("2024-06-03T14:30:00Z", "AAPL", TradeStatus::Win, 250.0)
            .with_side("long")
            .with_quantity(10.0)
            .with_prices(Some(190.0), Some(215.0))
            .with_strategy("Breakout")
    }

    #[test]
    fn open_is_not_closed() {
        assert!(!TradeStatus::Open.is_closed());
        assert!(TradeStatus::Win.is_closed());
        assert!(TradeStatus::Loss.is_closed());
        assert!(TradeStatus::Breakeven.is_closed());
    }

    #[test]
    fn timestamp_parses_log_date() {
        let ts = sample_trade().timestamp().unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-06-03T14:30:00+00:00");
    }

    #[test]
    fn malformed_date_has_no_timestamp() {
        let trade = TradeRecord::new("last tuesday", "AAPL", TradeStatus::Win, 1.0);
        assert!(trade.timestamp().is_none());
    }

    #[test]
    fn strategy_label_defaults() {
        let trade = TradeRecord::new("2024-06-03", "AAPL", TradeStatus::Win, 1.0);
        assert_eq!(trade.strategy_label(), NO_STRATEGY);
        assert_eq!(trade.clone().with_strategy("  ").strategy_label(), NO_STRATEGY);
        assert_eq!(sample_trade().strategy_label(), "Breakout");
    }

    #[test]
    fn holding_dates_fall_back_to_log_date() {
        let trade = sample_trade();
        assert_eq!(trade.acquired_on(), "2024-06-03T14:30:00Z");
        assert_eq!(trade.sold_on(), "2024-06-03T14:30:00Z");

        let trade = trade.with_holding_dates(Some("2024-05-28"), None::<String>);
        assert_eq!(trade.acquired_on(), "2024-05-28");
        assert_eq!(trade.sold_on(), "2024-06-03T14:30:00Z");
    }

    #[test]
    fn quantity_defaults_to_one() {
        let trade = TradeRecord::new("2024-06-03", "AAPL", TradeStatus::Loss, -5.0);
        assert_eq!(trade.effective_quantity(), 1.0);
        assert_eq!(sample_trade().effective_quantity(), 10.0);
    }

    #[test]
    fn deserializes_camel_case_with_missing_optionals() {
        let json = r#"{
            "date": "2024-06-03",
            "symbol": "TSLA",
            "side": "short",
            "status": "breakeven",
            "pnl": 0,
            "exitPrice": 180.5
        }"#;
        let trade: TradeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(trade.status, TradeStatus::Breakeven);
        assert_eq!(trade.exit_price, Some(180.5));
        assert_eq!(trade.entry_price, None);
        assert_eq!(trade.quantity, None);
        assert_eq!(trade.strategy, None);
    }

    #[test]
    fn null_symbol_and_side_read_as_empty() {
        let json = r#"{"date": "2024-06-03", "symbol": null, "side": null, "status": "win", "pnl": 3}"#;
        let trade: TradeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(trade.symbol, "");
        assert_eq!(trade.side, "");

        let json = r#"{"date": "2024-06-03", "status": "win", "pnl": 3}"#;
        let trade: TradeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(trade.side, "");
    }

    #[test]
    fn unknown_status_is_rejected() {
        let json = r#"{"date": "2024-06-03", "symbol": "TSLA", "status": "pending", "pnl": 1}"#;
        assert!(serde_json::from_str::<TradeRecord>(json).is_err());
    }
}
