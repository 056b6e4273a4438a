// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Logged exercise sets.

use crate::models::{fields, ExerciseType};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One logged set, validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SetRecord {
    /// Opaque document ID
    #[serde(default)]
    pub id: String,
    /// User-local day the set is attributed to
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub exercise: ExerciseType,
    /// Repetitions, always > 0
    pub count: u32,
    /// Insertion time, only used to order sets within a day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub created_at: Option<DateTime<Utc>>,
}

impl SetRecord {
    /// Re-cast an untyped document into a set.
    ///
    /// Returns `None` when `type`, `count` or `date` are missing or
    /// malformed. A missing `id` is tolerated.
    pub fn from_json(doc: &Value) -> Option<Self> {
        Some(Self {
            id: fields::identifier(doc, "id").unwrap_or_default(),
            date: fields::calendar_date(doc, "date")?,
            exercise: fields::exercise(doc, "type")?,
            count: fields::positive_count(doc, "count")?,
            created_at: fields::timestamp(doc, "createdAt"),
        })
    }
}

/// Records that survived validation and how many were dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

impl<T> Default for Validated<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: 0,
        }
    }
}

/// Validate a batch of documents, keeping input order.
pub(crate) fn validate_with<T>(
    docs: &[Value],
    kind: &'static str,
    parse: impl Fn(&Value) -> Option<T>,
) -> Validated<T> {
    let mut out = Validated {
        records: Vec::with_capacity(docs.len()),
        skipped: 0,
    };
    for (index, doc) in docs.iter().enumerate() {
        match parse(doc) {
            Some(record) => out.records.push(record),
            None => {
                tracing::debug!(kind, index, "Skipping malformed record");
                out.skipped += 1;
            }
        }
    }
    out
}

/// Validate untyped set documents.
pub fn validate_sets(docs: &[Value]) -> Validated<SetRecord> {
    validate_with(docs, "set", SetRecord::from_json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_valid() {
        let set = SetRecord::from_json(&json!({
            "id": "a1",
            "date": "2024-01-15",
            "type": "squat",
            "count": 25,
            "createdAt": "2024-01-15T18:00:00Z"
        }))
        .unwrap();

        assert_eq!(set.id, "a1");
        assert_eq!(set.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(set.exercise, ExerciseType::Squat);
        assert_eq!(set.count, 25);
        assert!(set.created_at.is_some());
    }

    #[test]
    fn test_validate_sets_skips_malformed() {
        let docs = vec![
            json!({"id": "ok", "date": "2024-01-15", "type": "abs", "count": 30}),
            json!({"id": "no-type", "date": "2024-01-15", "count": 30}),
            json!({"id": "bad-type", "date": "2024-01-15", "type": "burpee", "count": 30}),
            json!({"id": "text-count", "date": "2024-01-15", "type": "abs", "count": "30"}),
            json!({"id": "no-count", "date": "2024-01-15", "type": "abs"}),
            json!({"id": "bad-date", "date": "15/01/2024", "type": "abs", "count": 30}),
            json!("not an object"),
        ];

        let validated = validate_sets(&docs);

        assert_eq!(validated.records.len(), 1);
        assert_eq!(validated.records[0].id, "ok");
        assert_eq!(validated.skipped, 6);
    }

    #[test]
    fn test_serializes_with_wire_names() {
        let set = SetRecord {
            id: "x".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            exercise: ExerciseType::Pushup,
            count: 10,
            created_at: None,
        };
        let value = serde_json::to_value(&set).unwrap();
        assert_eq!(
            value,
            json!({"id": "x", "date": "2024-03-01", "type": "pushup", "count": 10})
        );
    }
}
