//! Timestamp parsing and calendar helpers shared by the analysis components.
//!
//! Journal exports carry dates in a handful of ISO-8601 shapes:
//! - RFC 3339 with an offset (`2024-06-01T14:30:00Z`, `...-04:00`)
//! - naive date-time (`2024-06-01T14:30:00`, `2024-06-01 14:30:00.250`), read as UTC
//! - plain date (`2024-06-01`), read as UTC midnight
//!
//! Instants are compared in UTC. Calendar questions (which day, weekday or
//! tax year) are answered from the date as written, offset included.

use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc, Weekday};
use thiserror::Error;

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("unparsable timestamp '{0}'")]
    Unparsable(String),
    #[error("year {0} is outside the supported calendar range")]
    YearOutOfRange(i32),
}

/// Parse a journal timestamp into UTC.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DateError> {
    parse_local_timestamp(raw).map(|ts| ts.with_timezone(&Utc))
}

/// Parse a journal timestamp, keeping the offset it was written with.
///
/// Forms without an offset get `+00:00`.
pub fn parse_local_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, DateError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DateError::Unparsable(String::new()));
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts);
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(Utc.from_utc_datetime(&naive).fixed_offset());
        }
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive).fixed_offset())
        .ok_or_else(|| DateError::Unparsable(raw.to_string()))
}

/// Calendar days Jan 1 ..= Dec 31 of `year`.
///
/// Compared against the day as written, so a trade logged late on Dec 31 in
/// any offset belongs to `year`.
pub fn year_range(year: i32) -> Result<RangeInclusive<NaiveDate>, DateError> {
    match (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    ) {
        (Some(first), Some(last)) => Ok(first..=last),
        _ => Err(DateError::YearOutOfRange(year)),
    }
}

/// Short calendar-day label used for daily buckets, e.g. `"Jun 1"`.
pub fn day_label(day: &NaiveDate) -> String {
    day.format("%b %-d").to_string()
}

/// Three-letter weekday label, e.g. `"Mon"`.
pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

pub fn weekday_of(day: &NaiveDate) -> Weekday {
    day.weekday()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parses_rfc3339_with_offset() {
        let ts = parse_timestamp("2024-06-01T10:00:00-04:00").unwrap();
        assert_eq!(ts.hour(), 14);
        assert_eq!(ts.day(), 1);
    }

    #[test]
    fn local_timestamp_keeps_written_day() {
        let local = parse_local_timestamp("2024-12-31T20:00:00-05:00").unwrap();
        assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert_eq!(local.offset().local_minus_utc(), -5 * 3600);
        assert_eq!(
            local.with_timezone(&Utc),
            parse_timestamp("2025-01-01T01:00:00Z").unwrap()
        );
    }

    #[test]
    fn naive_forms_get_zero_offset() {
        let local = parse_local_timestamp("2024-06-01 09:15").unwrap();
        assert_eq!(local.offset().local_minus_utc(), 0);
        assert_eq!(local.hour(), 9);
    }

    #[test]
    fn parses_zulu() {
        let ts = parse_timestamp("2024-06-01T10:00:00.123Z").unwrap();
        assert_eq!(ts.hour(), 10);
    }

    #[test]
    fn parses_naive_datetime_as_utc() {
        let a = parse_timestamp("2024-06-01T09:15:00").unwrap();
        let b = parse_timestamp("2024-06-01 09:15:00").unwrap();
        let c = parse_timestamp("2024-06-01T09:15").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.hour(), 9);
    }

    #[test]
    fn parses_plain_date_as_midnight() {
        let ts = parse_timestamp(" 2024-06-01 ").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2024, 6, 1));
        assert_eq!(ts.hour(), 0);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("2024-13-01").is_err());
        assert!(parse_timestamp("06/01/2024").is_err());
        assert_eq!(
            parse_timestamp("soon"),
            Err(DateError::Unparsable("soon".into()))
        );
    }

    #[test]
    fn year_range_covers_whole_year() {
        let days = year_range(2024).unwrap();
        assert_eq!(*days.start(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(*days.end(), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        let late = parse_local_timestamp("2024-12-31T23:59:59-08:00").unwrap();
        assert!(days.contains(&late.date_naive()));
        assert!(!year_range(2025).unwrap().contains(&late.date_naive()));
    }

    #[test]
    fn year_range_rejects_extreme_years() {
        assert_eq!(year_range(i32::MAX), Err(DateError::YearOutOfRange(i32::MAX)));
    }

    #[test]
    fn day_label_has_no_padding() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(day_label(&day), "Jun 1");
        let day = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        assert_eq!(day_label(&day), "Dec 25");
    }

    #[test]
    fn weekday_helpers() {
        // 2024-06-03 was a Monday
        let day = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert_eq!(weekday_of(&day), Weekday::Mon);
        assert_eq!(weekday_label(weekday_of(&day)), "Mon");
    }
}
