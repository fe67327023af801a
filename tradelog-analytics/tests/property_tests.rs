//! Property tests for statistics engine invariants.
//!
//! Uses proptest to verify:
//! 1. Win rate bounds and the closed-set partition identity
//! 2. Profit factor tri-state
//! 3. Equity curve is the running sum of date-sorted pnl
//! 4. Breakeven trades never change streak maxima
//! 5. Weekday breakdown is always Mon–Fri
//! 6. Idempotence for a fixed `as_of`

use chrono::{DateTime, Duration, Utc};
use proptest::prelude::*;
use tradelog_analytics::stats::streaks::streaks_of;
use tradelog_analytics::{compute_stats, ProfitFactor};
use tradelog_core::{parse_timestamp, TimeWindow, TradeRecord, TradeStatus};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_status() -> impl Strategy<Value = TradeStatus> {
    prop_oneof![
        Just(TradeStatus::Open),
        Just(TradeStatus::Win),
        Just(TradeStatus::Loss),
        Just(TradeStatus::Breakeven),
    ]
}

fn arb_closed_status() -> impl Strategy<Value = TradeStatus> {
    prop_oneof![
        Just(TradeStatus::Win),
        Just(TradeStatus::Loss),
        Just(TradeStatus::Breakeven),
    ]
}

/// Pnl consistent with status, rounded to cents.
fn pnl_for(status: TradeStatus, magnitude: f64) -> f64 {
    let m = (magnitude * 100.0).round() / 100.0;
    match status {
        TradeStatus::Win => m.max(0.01),
        TradeStatus::Loss => -m.max(0.01),
        TradeStatus::Breakeven | TradeStatus::Open => 0.0,
    }
}

fn base_date() -> DateTime<Utc> {
    parse_timestamp("2024-01-01T09:30:00Z").unwrap()
}

fn arb_record() -> impl Strategy<Value = TradeRecord> {
    (arb_status(), 0.0..5_000.0_f64, 0..180_i64, 0..3_usize).prop_map(
        |(status, magnitude, day_offset, strategy)| {
            let date = (base_date() + Duration::days(day_offset)).to_rfc3339();
            let record = TradeRecord::new(date, "SPY", status, pnl_for(status, magnitude));
            match strategy {
                0 => record,
                1 => record.with_strategy("ORB"),
                _ => record.with_strategy("VWAP"),
            }
        },
    )
}

fn arb_journal() -> impl Strategy<Value = Vec<TradeRecord>> {
    prop::collection::vec(arb_record(), 0..60)
}

fn as_of() -> DateTime<Utc> {
    parse_timestamp("2024-07-01T00:00:00Z").unwrap()
}

proptest! {
    // ── 1. Rates and partition ──

    #[test]
    fn win_rate_bounded_and_partition_holds(journal in arb_journal()) {
        let stats = compute_stats(&journal, TimeWindow::All, as_of());
        prop_assert!(stats.win_rate >= 0.0 && stats.win_rate <= 100.0);
        prop_assert_eq!(
            stats.winning_trades + stats.losing_trades + stats.breakeven_trades,
            stats.total_trades
        );
        prop_assert_eq!(stats.total_trades + stats.open_trades, journal.len());
    }

    // ── 2. Profit factor tri-state ──

    #[test]
    fn profit_factor_tri_state(journal in arb_journal()) {
        let stats = compute_stats(&journal, TimeWindow::All, as_of());
        match stats.profit_factor {
            ProfitFactor::Infinite => {
                prop_assert_eq!(stats.loss_pnl, 0.0);
                prop_assert!(stats.win_pnl > 0.0);
            }
            ProfitFactor::Finite(v) => {
                if stats.loss_pnl > 0.0 {
                    prop_assert_eq!(v, stats.win_pnl / stats.loss_pnl);
                } else {
                    prop_assert_eq!(v, 0.0);
                    prop_assert!(stats.win_pnl <= 0.0);
                }
            }
        }
        if stats.win_pnl == 0.0 {
            prop_assert_eq!(stats.profit_factor, ProfitFactor::Finite(0.0));
        }
    }

    // ── 3. Equity curve ──

    #[test]
    fn equity_is_running_sum_of_sorted_pnl(journal in arb_journal()) {
        let stats = compute_stats(&journal, TimeWindow::All, as_of());
        prop_assert_eq!(stats.equity_curve.len(), stats.total_trades);

        let mut closed: Vec<(DateTime<Utc>, f64)> = journal
            .iter()
            .filter(|r| r.is_closed())
            .filter_map(|r| r.timestamp().map(|ts| (ts, r.pnl)))
            .collect();
        closed.sort_by_key(|(ts, _)| *ts);

        let mut previous = 0.0;
        for (point, (ts, pnl)) in stats.equity_curve.iter().zip(closed) {
            prop_assert_eq!(point.date, ts);
            prop_assert_eq!(point.equity, previous + pnl);
            previous = point.equity;
        }
    }

    // ── 4. Breakeven is transparent to streaks ──

    #[test]
    fn removing_breakeven_keeps_streaks(
        statuses in prop::collection::vec(arb_closed_status(), 0..80)
    ) {
        let with = streaks_of(statuses.iter().copied());
        let without = streaks_of(
            statuses.iter().copied().filter(|s| *s != TradeStatus::Breakeven)
        );
        prop_assert_eq!(with, without);
    }

    // ── 5. Weekday shape ──

    #[test]
    fn weekday_breakdown_is_mon_to_fri(journal in arb_journal()) {
        let stats = compute_stats(&journal, TimeWindow::All, as_of());
        let days: Vec<&str> = stats.weekday_breakdown.iter().map(|d| d.day.as_str()).collect();
        prop_assert_eq!(days, vec!["Mon", "Tue", "Wed", "Thu", "Fri"]);
    }

    // ── 6. Idempotence ──

    #[test]
    fn same_input_same_output(journal in arb_journal(), window_idx in 0..4_usize) {
        let window = TimeWindow::EVERY[window_idx];
        let first = compute_stats(&journal, window, as_of());
        let second = compute_stats(&journal, window, as_of());
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        prop_assert_eq!(first, second);
    }

    // ── Windows are nested ──

    #[test]
    fn shorter_windows_see_fewer_trades(journal in arb_journal()) {
        let counts: Vec<usize> = TimeWindow::EVERY
            .iter()
            .map(|&w| compute_stats(&journal, w, as_of()).total_trades)
            .collect();
        prop_assert!(counts.windows(2).all(|w| w[0] <= w[1]));
    }
}
