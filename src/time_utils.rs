// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for calendar dates and timestamps.
//!
//! All day arithmetic is done on [`NaiveDate`]: a set belongs to the
//! user-local calendar day written in its `date` field, so no timezone
//! conversion ever happens here.

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, SecondsFormat, Utc};

/// Canonical day format used by records and API payloads.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Earliest and latest accepted years.
///
/// Day buckets are materialized for every date between the first record
/// and today, so the accepted range bounds the work one request can cause.
pub const MIN_YEAR: i32 = 1970;
pub const MAX_YEAR: i32 = 2100;

/// Error returned for strings that are not a real `YYYY-MM-DD` day.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date '{0}': expected YYYY-MM-DD between 1970 and 2100")]
pub struct InvalidDate(pub String);

/// Parse a strict `YYYY-MM-DD` calendar date between [`MIN_YEAR`] and
/// [`MAX_YEAR`].
///
/// chrono accepts unpadded fields, so the length and separators are
/// checked first to keep the canonical form the only accepted one.
pub fn parse_ymd(raw: &str) -> Result<NaiveDate, InvalidDate> {
    let bytes = raw.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return Err(InvalidDate(raw.to_string()));
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .filter(|date| (MIN_YEAR..=MAX_YEAR).contains(&date.year()))
        .ok_or_else(|| InvalidDate(raw.to_string()))
}

/// Format a day as `YYYY-MM-DD`.
pub fn format_ymd(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Today's date on the server's local clock.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Resolve an optional `YYYY-MM-DD` override, falling back to the local clock.
pub fn resolve_today(raw: Option<&str>) -> Result<NaiveDate, InvalidDate> {
    raw.map(parse_ymd).transpose().map(|d| d.unwrap_or_else(local_today))
}

/// Shift a day forward (positive) or backward (negative).
///
/// Saturates at chrono's representable range instead of panicking.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

/// Monday of the week containing `date`.
pub fn monday_of_week(date: NaiveDate) -> NaiveDate {
    let offset = date.weekday().num_days_from_monday();
    add_days(date, -i64::from(offset))
}

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse an RFC3339 timestamp into UTC, returning `None` on bad input.
pub fn parse_utc_rfc3339(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(raw: &str) -> NaiveDate {
        parse_ymd(raw).unwrap()
    }

    #[test]
    fn test_parse_ymd_accepts_canonical_form() {
        assert_eq!(d("2024-02-29"), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_parse_ymd_rejects_other_shapes() {
        assert!(parse_ymd("2024-1-5").is_err());
        assert!(parse_ymd("2023-02-29").is_err());
        assert!(parse_ymd("2024/01/05").is_err());
        assert!(parse_ymd("2024-01-05T00:00:00Z").is_err());
        assert!(parse_ymd("").is_err());
    }

    #[test]
    fn test_parse_ymd_rejects_out_of_range_years() {
        assert!(parse_ymd("0000-01-01").is_err());
        assert!(parse_ymd("1969-12-31").is_err());
        assert!(parse_ymd("9999-12-31").is_err());
        assert!(parse_ymd("1970-01-01").is_ok());
        assert!(parse_ymd("2100-12-31").is_ok());
    }

    #[test]
    fn test_monday_of_week() {
        // 2024-01-07 is a Sunday
        assert_eq!(monday_of_week(d("2024-01-07")), d("2024-01-01"));
        assert_eq!(monday_of_week(d("2024-01-01")), d("2024-01-01"));
        assert_eq!(monday_of_week(d("2024-01-03")), d("2024-01-01"));
    }

    #[test]
    fn test_add_days_crosses_month_and_year() {
        assert_eq!(add_days(d("2023-12-31"), 1), d("2024-01-01"));
        assert_eq!(add_days(d("2024-03-01"), -1), d("2024-02-29"));
    }

    #[test]
    fn test_resolve_today_override() {
        assert_eq!(resolve_today(Some("2024-05-06")).unwrap(), d("2024-05-06"));
        assert!(resolve_today(Some("yesterday")).is_err());
    }

    #[test]
    fn test_rfc3339_roundtrip_uses_z_suffix() {
        let ts = parse_utc_rfc3339("2024-01-15T10:30:00+02:00").unwrap();
        assert_eq!(format_utc_rfc3339(ts), "2024-01-15T08:30:00Z");
        assert!(parse_utc_rfc3339("not a timestamp").is_none());
    }
}
