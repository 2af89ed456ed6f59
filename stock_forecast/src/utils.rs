//! Utility functions for the stock_forecast crate

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};

/// Naive date-time layouts accepted in the timestamp column
const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
];

/// Offset-carrying layouts that are not strict RFC 3339
const OFFSET_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%d %H:%M:%S%z",
];

/// Parse a timestamp and keep only its calendar date
///
/// Any time of day is dropped. When the value carries a UTC offset the date is
/// taken in that offset (the wall-clock date), so `2020-01-02T23:00:00-05:00`
/// is 2020-01-02, not the following UTC day.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.date_naive());
    }

    if let Some(date) = OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(raw, format).ok())
        .map(|datetime| datetime.date_naive())
    {
        return Some(date);
    }

    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|datetime| datetime.date())
}

/// Consecutive calendar days following `last`
pub fn future_dates(last: NaiveDate, periods: usize) -> Vec<NaiveDate> {
    (1..=periods as u64)
        .map_while(|offset| last.checked_add_days(Days::new(offset)))
        .collect()
}
