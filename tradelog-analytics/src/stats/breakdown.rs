//! Cohort breakdowns: per calendar day, per strategy, per weekday.

use std::collections::HashMap;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use tradelog_core::dates::{day_label, weekday_label, weekday_of};
use tradelog_core::{DatedTrade, TradeStatus};

use super::metrics::ratio_or_zero;

/// Number of most recent daily buckets kept.
pub const MAX_DAILY_BUCKETS: usize = 30;

/// Weekdays reported, in output order.
pub const TRADING_DAYS: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPnl {
    /// Calendar day label, e.g. `"Jun 1"`.
    pub date: String,
    pub pnl: f64,
    pub trades: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyStats {
    pub strategy: String,
    pub trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub pnl: f64,
    /// wins / (wins + losses) × 100; breakeven trades are not counted.
    pub win_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayPnl {
    pub day: String,
    pub pnl: f64,
    pub trades: usize,
}

/// P&L per calendar day label, in first-seen order, last
/// [`MAX_DAILY_BUCKETS`] buckets only.
///
/// The label carries no year, so the same month/day in different years shares
/// a bucket.
pub fn daily_pnl(closed: &[DatedTrade<'_>]) -> Vec<DailyPnl> {
    let mut buckets: Vec<DailyPnl> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for trade in closed {
        let label = day_label(&trade.day);
        let slot = *index.entry(label.clone()).or_insert_with(|| {
            buckets.push(DailyPnl {
                date: label,
                pnl: 0.0,
                trades: 0,
            });
            buckets.len() - 1
        });
        buckets[slot].pnl += trade.pnl();
        buckets[slot].trades += 1;
    }

    let skip = buckets.len().saturating_sub(MAX_DAILY_BUCKETS);
    buckets.split_off(skip)
}

/// Per-strategy tallies, sorted by P&L descending (stable on ties).
pub fn strategy_breakdown(closed: &[DatedTrade<'_>]) -> Vec<StrategyStats> {
    let mut groups: Vec<StrategyStats> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for trade in closed {
        let label = trade.record.strategy_label();
        let slot = *index.entry(label).or_insert_with(|| {
            groups.push(StrategyStats {
                strategy: label.to_string(),
                trades: 0,
                wins: 0,
                losses: 0,
                pnl: 0.0,
                win_rate: 0.0,
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.trades += 1;
        group.pnl += trade.pnl();
        match trade.record.status {
            TradeStatus::Win => group.wins += 1,
            TradeStatus::Loss => group.losses += 1,
            TradeStatus::Breakeven | TradeStatus::Open => {}
        }
    }

    for group in &mut groups {
        group.win_rate = ratio_or_zero(group.wins as f64, group.wins + group.losses) * 100.0;
    }

    groups.sort_by(|a, b| b.pnl.total_cmp(&a.pnl));
    groups
}

/// Monday–Friday P&L. Always five entries; weekend trades are dropped.
pub fn weekday_breakdown(closed: &[DatedTrade<'_>]) -> Vec<WeekdayPnl> {
    // Indexed Sun..Sat like a calendar row.
    let mut pnl = [0.0_f64; 7];
    let mut trades = [0_usize; 7];

    for trade in closed {
        let idx = weekday_of(&trade.day).num_days_from_sunday() as usize;
        pnl[idx] += trade.pnl();
        trades[idx] += 1;
    }

    TRADING_DAYS
        .iter()
        .map(|&day| {
            let idx = day.num_days_from_sunday() as usize;
            WeekdayPnl {
                day: weekday_label(day).to_string(),
                pnl: pnl[idx],
                trades: trades[idx],
            }
        })
        .collect()
}
