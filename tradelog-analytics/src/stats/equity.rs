//! Cumulative P&L curve over closed trades in date order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tradelog_core::DatedTrade;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: DateTime<Utc>,
    pub equity: f64,
}

/// Running sum of `pnl` after a stable ascending sort by trade date.
///
/// Trades logged at the same instant keep their journal order. One point per
/// closed trade; the implicit starting equity is 0.
pub fn equity_curve(closed: &[DatedTrade<'_>]) -> Vec<EquityPoint> {
    let mut ordered: Vec<&DatedTrade<'_>> = closed.iter().collect();
    ordered.sort_by_key(|t| t.at);

    let mut equity = 0.0;
    ordered
        .into_iter()
        .map(|t| {
            equity += t.pnl();
            EquityPoint {
                date: t.at,
                equity,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradelog_core::{dated, TradeRecord, TradeStatus};

    #[test]
    fn sorts_by_date_and_accumulates() {
        let records = vec![
            TradeRecord::new("2024-06-05", "C", TradeStatus::Win, 30.0),
            TradeRecord::new("2024-06-01", "A", TradeStatus::Loss, -10.0),
            TradeRecord::new("2024-06-03", "B", TradeStatus::Win, 25.0),
        ];
        let closed: Vec<_> = dated(&records).collect();
        let curve = equity_curve(&closed);
        let values: Vec<f64> = curve.iter().map(|p| p.equity).collect();
        assert_eq!(values, vec![-10.0, 15.0, 45.0]);
        assert!(curve.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn ties_keep_journal_order() {
        let records = vec![
            TradeRecord::new("2024-06-01", "A", TradeStatus::Win, 5.0),
            TradeRecord::new("2024-06-01", "B", TradeStatus::Loss, -3.0),
        ];
        let closed: Vec<_> = dated(&records).collect();
        let curve = equity_curve(&closed);
        assert_eq!(curve[0].equity, 5.0);
        assert_eq!(curve[1].equity, 2.0);
    }

    #[test]
    fn empty_input_gives_empty_curve() {
        assert!(equity_curve(&[]).is_empty());
    }
}
