//! Scalar trade metrics: pure functions over the closed-trade partition.
//!
//! Every function takes the already-windowed closed trades and classifies by
//! `status`, never by re-deriving win/loss from the sign of `pnl`. Empty input
//! yields 0, never NaN.

use std::fmt;

use serde::{Deserialize, Serialize};
use tradelog_core::{DatedTrade, TradeStatus};

/// Gross profit over gross loss, with the all-winners case kept exact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfitFactor {
    Finite(f64),
    /// Winning P&L with no losing P&L at all.
    Infinite,
}

impl ProfitFactor {
    /// `win_pnl / loss_pnl` when there are losses, `Infinite` when there are
    /// only gains, otherwise zero.
    pub fn from_gross(win_pnl: f64, loss_pnl: f64) -> Self {
        if loss_pnl > 0.0 {
            ProfitFactor::Finite(win_pnl / loss_pnl)
        } else if win_pnl > 0.0 {
            ProfitFactor::Infinite
        } else {
            ProfitFactor::Finite(0.0)
        }
    }

    pub fn value(self) -> f64 {
        match self {
            ProfitFactor::Finite(v) => v,
            ProfitFactor::Infinite => f64::INFINITY,
        }
    }

    pub fn is_infinite(self) -> bool {
        matches!(self, ProfitFactor::Infinite)
    }
}

impl Default for ProfitFactor {
    fn default() -> Self {
        ProfitFactor::Finite(0.0)
    }
}

impl fmt::Display for ProfitFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfitFactor::Finite(v) => write!(f, "{v:.2}"),
            ProfitFactor::Infinite => f.write_str("∞"),
        }
    }
}

// ─── Counts ─────────────────────────────────────────────────────────

pub fn count_status(closed: &[DatedTrade<'_>], status: TradeStatus) -> usize {
    closed.iter().filter(|t| t.record.status == status).count()
}

// ─── Sums ───────────────────────────────────────────────────────────

pub fn total_pnl(closed: &[DatedTrade<'_>]) -> f64 {
    closed.iter().map(|t| t.pnl()).sum()
}

/// Gross winning P&L (sum over `win` trades).
pub fn win_pnl(closed: &[DatedTrade<'_>]) -> f64 {
    closed
        .iter()
        .filter(|t| t.record.status == TradeStatus::Win)
        .map(|t| t.pnl())
        .sum()
}

/// Gross losing P&L as a positive magnitude (sum of |pnl| over `loss` trades).
pub fn loss_pnl(closed: &[DatedTrade<'_>]) -> f64 {
    closed
        .iter()
        .filter(|t| t.record.status == TradeStatus::Loss)
        .map(|t| t.pnl().abs())
        .sum()
}

// ─── Ratios ─────────────────────────────────────────────────────────

/// Percentage of closed trades marked `win`, in `[0, 100]`.
pub fn win_rate(closed: &[DatedTrade<'_>]) -> f64 {
    if closed.is_empty() {
        return 0.0;
    }
    count_status(closed, TradeStatus::Win) as f64 / closed.len() as f64 * 100.0
}

pub fn avg_win(closed: &[DatedTrade<'_>]) -> f64 {
    ratio_or_zero(win_pnl(closed), count_status(closed, TradeStatus::Win))
}

pub fn avg_loss(closed: &[DatedTrade<'_>]) -> f64 {
    ratio_or_zero(loss_pnl(closed), count_status(closed, TradeStatus::Loss))
}

/// Expected P&L per trade: P(win)·avg_win − P(loss)·avg_loss.
pub fn expectancy(closed: &[DatedTrade<'_>]) -> f64 {
    if closed.is_empty() {
        return 0.0;
    }
    let n = closed.len() as f64;
    let p_win = count_status(closed, TradeStatus::Win) as f64 / n;
    let p_loss = count_status(closed, TradeStatus::Loss) as f64 / n;
    p_win * avg_win(closed) - p_loss * avg_loss(closed)
}

pub fn profit_factor(closed: &[DatedTrade<'_>]) -> ProfitFactor {
    ProfitFactor::from_gross(win_pnl(closed), loss_pnl(closed))
}

/// Mean P&L per closed trade.
pub fn avg_trade_size(closed: &[DatedTrade<'_>]) -> f64 {
    ratio_or_zero(total_pnl(closed), closed.len())
}

// ─── Extremes ───────────────────────────────────────────────────────

/// Largest `pnl` among `win` trades, 0 if none.
pub fn biggest_win(closed: &[DatedTrade<'_>]) -> f64 {
    closed
        .iter()
        .filter(|t| t.record.status == TradeStatus::Win)
        .map(|t| t.pnl())
        .reduce(f64::max)
        .unwrap_or(0.0)
}

/// Most negative `pnl` among `loss` trades (signed), 0 if none.
pub fn biggest_loss(closed: &[DatedTrade<'_>]) -> f64 {
    closed
        .iter()
        .filter(|t| t.record.status == TradeStatus::Loss)
        .map(|t| t.pnl())
        .reduce(f64::min)
        .unwrap_or(0.0)
}

pub(crate) fn ratio_or_zero(numerator: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        numerator / count as f64
    }
}
