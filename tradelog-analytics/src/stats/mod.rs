//! Statistics engine: journal records + window in, metric bundle out.
//!
//! The engine is a pure function of `(records, window, as_of)`:
//! 1. Window filter: keep records whose date parses and is on/after the cutoff
//! 2. Closed partition: drop `open` records
//! 3. Scalars, streaks, equity curve and breakdowns over the closed set
//!
//! Nothing reads the wall clock; callers pass `as_of` explicitly.

pub mod breakdown;
pub mod equity;
pub mod metrics;
pub mod streaks;

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tradelog_core::{dated, DatedTrade, TimeWindow, TradeRecord, TradeStatus};

pub use breakdown::{DailyPnl, StrategyStats, WeekdayPnl};
pub use equity::EquityPoint;
pub use metrics::ProfitFactor;
pub use streaks::StreakSummary;

/// Every statistic the dashboard shows for one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeStats {
    pub window: TimeWindow,
    pub as_of: DateTime<Utc>,

    // ── Counts ──
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub breakeven_trades: usize,
    pub open_trades: usize,

    // ── P&L ──
    pub total_pnl: f64,
    pub win_pnl: f64,
    pub loss_pnl: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub biggest_win: f64,
    pub biggest_loss: f64,
    pub avg_trade_size: f64,

    // ── Ratios ──
    pub win_rate: f64,
    pub expectancy: f64,
    pub profit_factor: ProfitFactor,

    // ── Streaks ──
    pub max_win_streak: usize,
    pub max_loss_streak: usize,

    // ── Series ──
    pub equity_curve: Vec<EquityPoint>,
    pub daily_pnl: Vec<DailyPnl>,
    pub strategy_breakdown: Vec<StrategyStats>,
    pub weekday_breakdown: Vec<WeekdayPnl>,
}

impl TradeStats {
    /// Compute the full bundle for one window.
    pub fn compute(records: &[TradeRecord], window: TimeWindow, as_of: DateTime<Utc>) -> Self {
        let in_window: Vec<DatedTrade<'_>> = dated(records)
            .filter(|t| window.contains(t.at, as_of))
            .collect();
        let in_window_count = in_window.len();
        let closed: Vec<DatedTrade<'_>> = in_window
            .into_iter()
            .filter(|t| t.record.is_closed())
            .collect();
        let open_trades = in_window_count - closed.len();

        let streaks = streaks::streaks(&closed);

        tracing::debug!(
            window = %window,
            records = records.len(),
            closed = closed.len(),
            open = open_trades,
            "computed trade statistics"
        );

        Self {
            window,
            as_of,
            total_trades: closed.len(),
            winning_trades: metrics::count_status(&closed, TradeStatus::Win),
            losing_trades: metrics::count_status(&closed, TradeStatus::Loss),
            breakeven_trades: metrics::count_status(&closed, TradeStatus::Breakeven),
            open_trades,
            total_pnl: metrics::total_pnl(&closed),
            win_pnl: metrics::win_pnl(&closed),
            loss_pnl: metrics::loss_pnl(&closed),
            avg_win: metrics::avg_win(&closed),
            avg_loss: metrics::avg_loss(&closed),
            biggest_win: metrics::biggest_win(&closed),
            biggest_loss: metrics::biggest_loss(&closed),
            avg_trade_size: metrics::avg_trade_size(&closed),
            win_rate: metrics::win_rate(&closed),
            expectancy: metrics::expectancy(&closed),
            profit_factor: metrics::profit_factor(&closed),
            max_win_streak: streaks.max_win_streak,
            max_loss_streak: streaks.max_loss_streak,
            equity_curve: equity::equity_curve(&closed),
            daily_pnl: breakdown::daily_pnl(&closed),
            strategy_breakdown: breakdown::strategy_breakdown(&closed),
            weekday_breakdown: breakdown::weekday_breakdown(&closed),
        }
    }

    pub fn has_trades(&self) -> bool {
        self.total_trades > 0
    }
}

/// Single-window entry point.
pub fn compute_stats(records: &[TradeRecord], window: TimeWindow, as_of: DateTime<Utc>) -> TradeStats {
    TradeStats::compute(records, window, as_of)
}

/// One bundle per requested window, computed in parallel.
///
/// Output order matches `windows`. Each bundle equals what
/// [`compute_stats`] returns for that window.
pub fn compute_windows(
    records: &[TradeRecord],
    windows: &[TimeWindow],
    as_of: DateTime<Utc>,
) -> Vec<TradeStats> {
    windows
        .par_iter()
        .map(|&window| TradeStats::compute(records, window, as_of))
        .collect()
}
