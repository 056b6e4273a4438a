// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Derived statistics returned to the dashboard.
//!
//! Every value here is recomputed from the full record snapshot on each
//! request; nothing is stored.

use crate::models::ExerciseType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Per-exercise values; only exercises with a value are present.
pub type PerExercise<T> = BTreeMap<ExerciseType, T>;

/// A count tied to the day it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ExerciseRecord {
    pub count: u32,
    /// `YYYY-MM-DD`
    pub date: String,
}

/// Target hit rate for one exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ExerciseRate {
    pub hit: u32,
    pub total: u32,
    /// `hit / total`, in `0.0..=1.0`
    pub rate: f64,
}

/// Longest run of consecutive active days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StreakRun {
    pub length: u32,
    /// Empty when there is no history
    pub start_date: String,
    pub end_date: String,
}

/// Active days in the current week. `total` is always 7.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeeklyConsistency {
    pub trained: u32,
    pub total: u32,
}

impl WeeklyConsistency {
    pub const DAYS_PER_WEEK: u32 = 7;

    pub fn new(trained: u32) -> Self {
        Self {
            trained,
            total: Self::DAYS_PER_WEEK,
        }
    }
}

/// One weekday column of the heatmap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeekdayData {
    /// "Mon" .. "Sun"
    pub day: String,
    /// Sum of daily reps across all exercises
    pub total: u64,
    /// Number of days sampled
    pub count: u32,
    /// Rounded mean, 0 when `count` is 0
    pub avg: u64,
}

/// Full dashboard statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ComputedStats {
    // ─── Streaks & Consistency ───────────────────────────────────
    pub current_streak: u32,
    pub longest_streak: StreakRun,
    pub weekly_consistency: WeeklyConsistency,
    pub target_hit_rate: PerExercise<ExerciseRate>,

    // ─── Volume & Trend ──────────────────────────────────────────
    pub weekly_total: PerExercise<u64>,
    /// Percent change vs. last week; `None` when last week was zero
    pub week_over_week: PerExercise<Option<f64>>,
    pub all_time_total: PerExercise<u64>,
    pub grand_total: u64,

    // ─── Intensity ───────────────────────────────────────────────
    pub avg_reps_per_set: PerExercise<f64>,
    pub best_set: PerExercise<ExerciseRecord>,
    pub sets_per_day: PerExercise<f64>,
    pub max_daily_volume: PerExercise<ExerciseRecord>,

    // ─── Patterns ────────────────────────────────────────────────
    pub day_of_week_heatmap: Vec<WeekdayData>,
    /// Percent share of `grand_total`; empty when nothing was logged
    pub exercise_balance: PerExercise<f64>,

    // ─── Range ───────────────────────────────────────────────────
    pub total_days: u32,
    pub first_date: String,
    pub last_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_week_over_week_null_serializes_as_null() {
        let mut wow: PerExercise<Option<f64>> = BTreeMap::new();
        wow.insert(ExerciseType::Pushup, None);
        wow.insert(ExerciseType::Squat, Some(25.0));

        let value = serde_json::to_value(&wow).unwrap();
        assert_eq!(value, json!({"pushup": null, "squat": 25.0}));
    }

    #[test]
    fn test_streak_run_camel_case() {
        let run = StreakRun {
            length: 3,
            start_date: "2024-01-01".to_string(),
            end_date: "2024-01-03".to_string(),
        };
        let value = serde_json::to_value(&run).unwrap();
        assert_eq!(
            value,
            json!({"length": 3, "startDate": "2024-01-01", "endDate": "2024-01-03"})
        );
    }

    #[test]
    fn test_weekly_consistency_denominator() {
        assert_eq!(WeeklyConsistency::new(2).total, 7);
    }
}
