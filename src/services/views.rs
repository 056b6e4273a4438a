// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Read models for the home, history and chart screens.

use crate::models::{EffectiveTarget, ExerciseType, SetRecord, TargetSchedule};
use crate::time_utils::{add_days, format_ymd};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

// ─── Today's Progress ────────────────────────────────────────

/// Progress for one exercise logged today.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ExerciseProgress {
    #[serde(rename = "type")]
    pub exercise: ExerciseType,
    pub label: String,
    /// Individual set sizes in the order they were logged
    pub counts: Vec<u32>,
    pub total: u64,
    pub target: Option<EffectiveTarget>,
    /// Reps still needed to reach the target, 0 once met
    pub remaining: Option<u64>,
    pub target_met: bool,
}

/// Everything logged on one day, by exercise in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TodayProgress {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    pub exercises: Vec<ExerciseProgress>,
}

pub fn today_progress(
    sets: &[SetRecord],
    schedule: &TargetSchedule,
    today: NaiveDate,
) -> TodayProgress {
    let mut by_type: BTreeMap<ExerciseType, Vec<&SetRecord>> = BTreeMap::new();
    for set in sets.iter().filter(|s| s.date == today) {
        by_type.entry(set.exercise).or_default().push(set);
    }

    let exercises = by_type
        .into_iter()
        .map(|(exercise, mut logged)| {
            logged.sort_by_key(|s| s.created_at);
            let counts: Vec<u32> = logged.iter().map(|s| s.count).collect();
            let total: u64 = counts.iter().map(|c| u64::from(*c)).sum();
            let target = schedule.effective_on(exercise, today);
            let remaining = target.map(|t| u64::from(t.value).saturating_sub(total));
            ExerciseProgress {
                exercise,
                label: exercise.label().to_string(),
                counts,
                total,
                target,
                remaining,
                target_met: remaining == Some(0),
            }
        })
        .collect();

    TodayProgress {
        date: today,
        exercises,
    }
}

// ─── History ─────────────────────────────────────────────────

/// One exercise's sets on a history day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HistoryEntry {
    #[serde(rename = "type")]
    pub exercise: ExerciseType,
    pub sets: Vec<SetRecord>,
    pub total: u64,
}

/// A day in the history list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct HistoryDay {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    /// "Today" or "Yesterday" for the two most recent days
    pub relative: Option<String>,
    pub exercises: Vec<HistoryEntry>,
}

/// Days with sets, newest first.
pub fn history(sets: &[SetRecord], today: NaiveDate) -> Vec<HistoryDay> {
    let mut days: BTreeMap<NaiveDate, BTreeMap<ExerciseType, Vec<SetRecord>>> = BTreeMap::new();
    for set in sets {
        days.entry(set.date)
            .or_default()
            .entry(set.exercise)
            .or_default()
            .push(set.clone());
    }

    let yesterday = add_days(today, -1);
    days.into_iter()
        .rev()
        .map(|(date, by_type)| HistoryDay {
            date,
            relative: if date == today {
                Some("Today".to_string())
            } else if date == yesterday {
                Some("Yesterday".to_string())
            } else {
                None
            },
            exercises: by_type
                .into_iter()
                .map(|(exercise, mut sets)| {
                    sets.sort_by_key(|s| s.created_at);
                    let total = sets.iter().map(|s| u64::from(s.count)).sum();
                    HistoryEntry {
                        exercise,
                        sets,
                        total,
                    }
                })
                .collect(),
        })
        .collect()
}

// ─── Daily Series ────────────────────────────────────────────

/// Chart window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum SeriesPeriod {
    /// Today and the six days before
    #[serde(rename = "1w")]
    Week,
    /// One month back, exclusive. The day of month is kept and overflows
    /// into the next month, so 2024-03-31 looks back to "2024-02-31",
    /// i.e. 2024-03-02, and the window starts on 2024-03-03.
    #[default]
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "all", alias = "All")]
    All,
}

impl SeriesPeriod {
    /// First day inside the window, `None` for unbounded.
    pub fn start(self, today: NaiveDate) -> Option<NaiveDate> {
        match self {
            SeriesPeriod::Week => Some(add_days(today, -6)),
            SeriesPeriod::Month => {
                let (year, month) = match today.month() {
                    1 => (today.year() - 1, 12),
                    m => (today.year(), m - 1),
                };
                let month_back = NaiveDate::from_ymd_opt(year, month, 1)
                    .map_or(today, |first| add_days(first, i64::from(today.day()) - 1));
                Some(add_days(month_back, 1))
            }
            SeriesPeriod::All => None,
        }
    }
}

/// One row of the chart: non-zero totals per exercise for a day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailyTotals {
    /// `YYYY-MM-DD`
    pub date: String,
    pub totals: BTreeMap<ExerciseType, u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailySeries {
    pub period: SeriesPeriod,
    /// Exercises that appear in the window, catalog order
    pub types: Vec<ExerciseType>,
    /// Line color for each entry of `types`
    pub colors: BTreeMap<ExerciseType, String>,
    pub rows: Vec<DailyTotals>,
    /// Largest single-day value across all rows
    pub max_value: u64,
}

/// Day-by-day totals for the chart window ending today.
///
/// Rows start at the earliest set inside the window, or today when the
/// window is empty. Sets dated after today still get their own row.
pub fn daily_series(sets: &[SetRecord], period: SeriesPeriod, today: NaiveDate) -> DailySeries {
    let start = period.start(today);
    let in_window: Vec<&SetRecord> = sets
        .iter()
        .filter(|s| start.map_or(true, |first| s.date >= first))
        .collect();

    let first = in_window.iter().map(|s| s.date).min().unwrap_or(today);

    let mut by_date: BTreeMap<NaiveDate, BTreeMap<ExerciseType, u64>> = BTreeMap::new();
    let mut cursor = first;
    while cursor <= today {
        by_date.insert(cursor, BTreeMap::new());
        let next = add_days(cursor, 1);
        if next == cursor {
            break;
        }
        cursor = next;
    }

    for set in &in_window {
        *by_date
            .entry(set.date)
            .or_default()
            .entry(set.exercise)
            .or_insert(0) += u64::from(set.count);
    }

    let mut types: Vec<ExerciseType> = in_window.iter().map(|s| s.exercise).collect();
    types.sort();
    types.dedup();
    let colors = types
        .iter()
        .map(|exercise| (*exercise, exercise.color().to_string()))
        .collect();

    let max_value = by_date
        .values()
        .flat_map(|totals| totals.values().copied())
        .max()
        .unwrap_or(0);

    let rows = by_date
        .into_iter()
        .map(|(date, totals)| DailyTotals {
            date: format_ymd(date),
            totals,
        })
        .collect();

    DailySeries {
        period,
        types,
        colors,
        rows,
        max_value,
    }
}
