// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily targets and their effective-date schedule.

use crate::models::set::{validate_with, Validated};
use crate::models::{fields, ExerciseType};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// "From `date` onward the daily target for `exercise` is `value`."
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TargetRecord {
    #[serde(rename = "type")]
    pub exercise: ExerciseType,
    /// Reps per day
    pub value: u32,
    /// First day the target applies
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub created_at: Option<DateTime<Utc>>,
}

impl TargetRecord {
    /// Re-cast an untyped document into a target, `None` if malformed.
    pub fn from_json(doc: &Value) -> Option<Self> {
        Some(Self {
            exercise: fields::exercise(doc, "type")?,
            value: fields::positive_count(doc, "value")?,
            date: fields::calendar_date(doc, "date")?,
            created_at: fields::timestamp(doc, "createdAt"),
        })
    }
}

/// Validate untyped target documents.
pub fn validate_targets(docs: &[Value]) -> Validated<TargetRecord> {
    validate_with(docs, "target", TargetRecord::from_json)
}

/// Target in force on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EffectiveTarget {
    pub value: u32,
    /// Date the target was declared effective from
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
}

/// Effective targets per exercise; exercises without one are absent.
pub type TargetsAsOf = BTreeMap<ExerciseType, EffectiveTarget>;

/// Per-exercise target timelines sorted by effective date.
#[derive(Debug, Clone, Default)]
pub struct TargetSchedule {
    timelines: BTreeMap<ExerciseType, Vec<EffectiveTarget>>,
}

impl TargetSchedule {
    /// Build timelines from records in any order.
    ///
    /// The sort is stable, so two targets declared for the same date
    /// resolve to whichever came later in the input.
    pub fn from_records(records: &[TargetRecord]) -> Self {
        let mut timelines: BTreeMap<ExerciseType, Vec<EffectiveTarget>> = BTreeMap::new();
        for record in records {
            timelines
                .entry(record.exercise)
                .or_default()
                .push(EffectiveTarget {
                    value: record.value,
                    date: record.date,
                });
        }
        for timeline in timelines.values_mut() {
            timeline.sort_by_key(|t| t.date);
        }
        Self { timelines }
    }

    /// Whether any target was ever declared for `exercise`.
    pub fn has_schedule(&self, exercise: ExerciseType) -> bool {
        self.timelines.contains_key(&exercise)
    }

    /// Target in force for `exercise` on `date`.
    pub fn effective_on(&self, exercise: ExerciseType, date: NaiveDate) -> Option<EffectiveTarget> {
        let timeline = self.timelines.get(&exercise)?;
        // Index of the first entry strictly after `date`.
        let after = timeline.partition_point(|t| t.date <= date);
        after.checked_sub(1).map(|i| timeline[i])
    }

    /// Snapshot of every exercise's effective target on `date`.
    pub fn targets_as_of(&self, date: NaiveDate) -> TargetsAsOf {
        ExerciseType::ALL
            .into_iter()
            .filter_map(|t| self.effective_on(t, date).map(|e| (t, e)))
            .collect()
    }
}
