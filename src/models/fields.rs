// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Typed field accessors for loosely-shaped JSON documents.
//!
//! Document stores hand records back as untyped maps. These helpers pull
//! one field at a time and return `None` for anything that does not have
//! the expected shape, so callers can skip a record without failing.

use crate::models::ExerciseType;
use crate::time_utils::{parse_utc_rfc3339, parse_ymd};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

/// Strictly positive integer count. Numeric strings are rejected.
pub(crate) fn positive_count(doc: &Value, key: &str) -> Option<u32> {
    match doc.get(key)? {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                return u32::try_from(v).ok().filter(|v| *v > 0);
            }
            let f = n.as_f64()?;
            if f.fract() == 0.0 && f > 0.0 && f <= f64::from(u32::MAX) {
                Some(f as u32)
            } else {
                None
            }
        }
        _ => None,
    }
}

pub(crate) fn exercise(doc: &Value, key: &str) -> Option<ExerciseType> {
    doc.get(key)?.as_str()?.parse().ok()
}

pub(crate) fn calendar_date(doc: &Value, key: &str) -> Option<NaiveDate> {
    parse_ymd(doc.get(key)?.as_str()?).ok()
}

/// Opaque identifier; numbers are accepted and stringified.
pub(crate) fn identifier(doc: &Value, key: &str) -> Option<String> {
    match doc.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Insertion timestamp.
///
/// Accepts RFC3339 strings (exports) and `{seconds, nanoseconds}` objects
/// (raw store timestamps, with or without the leading underscore).
pub(crate) fn timestamp(doc: &Value, key: &str) -> Option<DateTime<Utc>> {
    match doc.get(key)? {
        Value::String(s) => parse_utc_rfc3339(s),
        Value::Object(map) => {
            let seconds = map
                .get("seconds")
                .or_else(|| map.get("_seconds"))?
                .as_i64()?;
            let nanos = map
                .get("nanoseconds")
                .or_else(|| map.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0);
            DateTime::from_timestamp(seconds, nanos)
        }
        _ => None,
    }
}
