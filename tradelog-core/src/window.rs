//! Trailing analysis windows (`7d`, `30d`, `90d`, `all`).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown time window '{0}' (expected one of: 7d, 30d, 90d, all)")]
pub struct WindowParseError(pub String);

/// Trailing window relative to an explicit `as_of` instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeWindow {
    #[serde(rename = "7d")]
    Last7Days,
    #[default]
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "90d")]
    Last90Days,
    #[serde(rename = "all")]
    All,
}

impl TimeWindow {
    pub const EVERY: [TimeWindow; 4] = [
        TimeWindow::Last7Days,
        TimeWindow::Last30Days,
        TimeWindow::Last90Days,
        TimeWindow::All,
    ];

    /// Length in days; `None` for the unbounded window.
    pub fn days(self) -> Option<i64> {
        match self {
            TimeWindow::Last7Days => Some(7),
            TimeWindow::Last30Days => Some(30),
            TimeWindow::Last90Days => Some(90),
            TimeWindow::All => None,
        }
    }

    /// Earliest instant still inside the window.
    pub fn cutoff(self, as_of: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.days().map(|d| as_of - Duration::days(d))
    }

    /// True when `ts` falls on or after the cutoff. There is no upper bound.
    pub fn contains(self, ts: DateTime<Utc>, as_of: DateTime<Utc>) -> bool {
        match self.cutoff(as_of) {
            Some(cutoff) => ts >= cutoff,
            None => true,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeWindow::Last7Days => "7d",
            TimeWindow::Last30Days => "30d",
            TimeWindow::Last90Days => "90d",
            TimeWindow::All => "all",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = WindowParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "7d" => Ok(TimeWindow::Last7Days),
            "30d" => Ok(TimeWindow::Last30Days),
            "90d" => Ok(TimeWindow::Last90Days),
            "all" => Ok(TimeWindow::All),
            other => Err(WindowParseError(other.to_string())),
        }
    }
}
