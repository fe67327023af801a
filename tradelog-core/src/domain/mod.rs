//! Domain types for the trade journal.

pub mod dated;
pub mod trade;

pub use dated::{dated, DatedTrade};
pub use trade::{TradeRecord, TradeStatus, NO_STRATEGY};
