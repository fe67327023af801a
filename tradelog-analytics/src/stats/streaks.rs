//! Win/loss streak detection over closed trades in journal order.
//!
//! Streaks follow the order records were supplied in, not date order. A
//! breakeven trade neither extends nor breaks either streak.

use serde::{Deserialize, Serialize};
use tradelog_core::{DatedTrade, TradeStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakSummary {
    pub max_win_streak: usize,
    pub max_loss_streak: usize,
}

pub fn streaks(closed: &[DatedTrade<'_>]) -> StreakSummary {
    streaks_of(closed.iter().map(|t| t.record.status))
}

/// Streak maxima for a sequence of statuses.
pub fn streaks_of(statuses: impl IntoIterator<Item = TradeStatus>) -> StreakSummary {
    let mut summary = StreakSummary::default();
    let mut win_run = 0;
    let mut loss_run = 0;

    for status in statuses {
        match status {
            TradeStatus::Win => {
                win_run += 1;
                loss_run = 0;
            }
            TradeStatus::Loss => {
                loss_run += 1;
                win_run = 0;
            }
            TradeStatus::Breakeven | TradeStatus::Open => {}
        }
        summary.max_win_streak = summary.max_win_streak.max(win_run);
        summary.max_loss_streak = summary.max_loss_streak.max(loss_run);
    }
    summary
}
