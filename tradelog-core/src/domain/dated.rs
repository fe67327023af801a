//! DatedTrade: a journal record paired with its parsed log date.

use chrono::{DateTime, NaiveDate, Utc};

use super::trade::TradeRecord;

/// A record whose `date` parsed successfully.
///
/// Analysis code works on these so each date string is parsed exactly once
/// per call. `at` orders trades and places them in trailing windows; `day`
/// is the calendar day as written and drives day, weekday and year grouping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatedTrade<'a> {
    pub record: &'a TradeRecord,
    pub at: DateTime<Utc>,
    pub day: NaiveDate,
}

impl<'a> DatedTrade<'a> {
    pub fn pnl(&self) -> f64 {
        self.record.pnl
    }
}

/// Pair every record with its parsed date, dropping unparsable ones.
///
/// Input order is preserved.
pub fn dated(records: &[TradeRecord]) -> impl Iterator<Item = DatedTrade<'_>> {
    records.iter().filter_map(|record| {
        record.local_timestamp().map(|local| DatedTrade {
            record,
            at: local.with_timezone(&Utc),
            day: local.date_naive(),
        })
    })
}
