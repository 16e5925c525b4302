//! Reading record timestamps into instants.
//!
//! Supported forms:
//! - RFC 3339: `2024-01-15T10:30:00Z`, `2024-01-15T10:30:00.123+02:00`
//! - Numeric offsets without a colon: `2024-01-15T10:30:00+0200`
//! - No offset, taken as UTC: `2024-01-15T10:30:00`, `2024-01-15 10:30:00.5`
//! - Bare dates, midnight UTC: `2024-01-15`
//! - JSON integers, taken as milliseconds since the epoch

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// Reads a timestamp field. Returns `None` for anything that is not a
/// recognisable instant; callers keep the data point regardless.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp_str(s),
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    }
}

pub fn parse_timestamp_str(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    try_parse_rfc3339(input)
        .or_else(|| try_parse_compact_offset(input))
        .or_else(|| try_parse_naive(input))
        .or_else(|| try_parse_date(input))
}

fn try_parse_rfc3339(input: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn try_parse_compact_offset(input: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f%z")
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn try_parse_naive(input: &str) -> Option<DateTime<Utc>> {
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn try_parse_date(input: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}
