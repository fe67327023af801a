//! TradeLog Core: journal domain types shared by the analysis components.
//!
//! This crate holds everything both the statistics engine and the tax report
//! need to agree on:
//! - `TradeRecord` / `TradeStatus`, the journal entry as exported by the store
//! - Timestamp parsing with silent rejection of malformed dates, keeping the
//!   written offset for calendar grouping
//! - Trailing analysis windows anchored to an explicit `as_of` instant

pub mod dates;
pub mod domain;
pub mod window;

pub use dates::{parse_local_timestamp, parse_timestamp, DateError};
pub use domain::{dated, DatedTrade, TradeRecord, TradeStatus, NO_STRATEGY};
pub use window::{TimeWindow, WindowParseError};
