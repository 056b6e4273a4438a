// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard statistics.
//!
//! [`compute_all_stats`] is a pure function of the set records, the target
//! records and the reference day. It never fails: malformed records are
//! dropped before they get here and an empty history produces zeroed
//! metrics.

use crate::models::stats::{
    ExerciseRate, ExerciseRecord, PerExercise, StreakRun, WeekdayData, WeeklyConsistency,
};
use crate::models::{ComputedStats, ExerciseType, SetRecord, TargetRecord, TargetSchedule};
use crate::services::day_aggregator::{build_day_map, DayMap};
use crate::time_utils::{add_days, format_ymd, monday_of_week};
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, HashSet};

const WEEKDAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Compute every dashboard metric as of `today`.
pub fn compute_all_stats(
    sets: &[SetRecord],
    targets: &[TargetRecord],
    today: NaiveDate,
) -> ComputedStats {
    tracing::debug!(
        sets = sets.len(),
        targets = targets.len(),
        today = %today,
        "Computing stats"
    );

    let day_map = build_day_map(sets, today);
    let schedule = TargetSchedule::from_records(targets);
    let active = day_map.active_dates();

    let all_time_total = all_time_total(sets);
    let grand_total: u64 = all_time_total.values().sum();

    ComputedStats {
        current_streak: current_streak(&day_map, today),
        longest_streak: longest_streak(active),
        weekly_consistency: weekly_consistency(&day_map, today),
        target_hit_rate: target_hit_rate(&day_map, &schedule),

        weekly_total: weekly_total(&day_map, today),
        week_over_week: week_over_week(&day_map, today),
        exercise_balance: exercise_balance(&all_time_total, grand_total),
        all_time_total,
        grand_total,

        avg_reps_per_set: avg_reps_per_set(sets),
        best_set: best_set(sets),
        sets_per_day: sets_per_day(sets),
        max_daily_volume: max_daily_volume(&day_map),

        day_of_week_heatmap: day_of_week_heatmap(&day_map),

        total_days: active.len() as u32,
        first_date: active.first().map(|d| format_ymd(*d)).unwrap_or_default(),
        last_date: active.last().map(|d| format_ymd(*d)).unwrap_or_default(),
    }
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ─── Streaks & Consistency ───────────────────────────────────

/// Consecutive active days ending today.
pub fn current_streak(day_map: &DayMap<'_>, today: NaiveDate) -> u32 {
    let mut count = 0;
    let mut cursor = today;
    while day_map.is_active(cursor) {
        count += 1;
        let previous = add_days(cursor, -1);
        if previous == cursor {
            break;
        }
        cursor = previous;
    }
    count
}

/// Longest run of consecutive dates; the earliest run wins ties.
pub fn longest_streak(sorted_dates: &[NaiveDate]) -> StreakRun {
    let Some(&first) = sorted_dates.first() else {
        return StreakRun::default();
    };

    let (mut best_len, mut best_start, mut best_end) = (1u32, first, first);
    let (mut run_len, mut run_start) = (1u32, first);

    for pair in sorted_dates.windows(2) {
        if pair[1] == add_days(pair[0], 1) {
            run_len += 1;
        } else {
            run_len = 1;
            run_start = pair[1];
        }
        if run_len > best_len {
            best_len = run_len;
            best_start = run_start;
            best_end = pair[1];
        }
    }

    StreakRun {
        length: best_len,
        start_date: format_ymd(best_start),
        end_date: format_ymd(best_end),
    }
}

/// Days of the current Monday-start week, up to and including today.
fn current_week_dates(today: NaiveDate) -> Vec<NaiveDate> {
    let monday = monday_of_week(today);
    (0..7)
        .map(|i| add_days(monday, i))
        .take_while(|d| *d <= today)
        .collect()
}

/// The full Monday-Sunday week before the current one.
fn previous_week_dates(today: NaiveDate) -> Vec<NaiveDate> {
    let previous_monday = add_days(monday_of_week(today), -7);
    (0..7).map(|i| add_days(previous_monday, i)).collect()
}

pub fn weekly_consistency(day_map: &DayMap<'_>, today: NaiveDate) -> WeeklyConsistency {
    let trained = current_week_dates(today)
        .into_iter()
        .filter(|d| day_map.is_active(*d))
        .count();
    WeeklyConsistency::new(trained as u32)
}

/// Share of bucketed days meeting the target in force on that day.
///
/// Exercises that never had a target are left out entirely.
pub fn target_hit_rate(
    day_map: &DayMap<'_>,
    schedule: &TargetSchedule,
) -> PerExercise<ExerciseRate> {
    let mut result = BTreeMap::new();

    for exercise in ExerciseType::ALL {
        if !schedule.has_schedule(exercise) {
            continue;
        }

        let (mut hit, mut total) = (0u32, 0u32);
        for bucket in day_map.buckets() {
            let Some(target) = schedule.effective_on(exercise, bucket.date) else {
                continue;
            };
            total += 1;
            if bucket.total_for(exercise) >= u64::from(target.value) {
                hit += 1;
            }
        }

        if total > 0 {
            result.insert(
                exercise,
                ExerciseRate {
                    hit,
                    total,
                    rate: f64::from(hit) / f64::from(total),
                },
            );
        }
    }

    result
}

// ─── Volume & Trend ──────────────────────────────────────────

/// Per-exercise sums over `dates`; empty when none of them has a bucket.
fn sum_days(day_map: &DayMap<'_>, dates: &[NaiveDate]) -> PerExercise<u64> {
    let mut totals = BTreeMap::new();
    for bucket in dates.iter().filter_map(|d| day_map.get(*d)) {
        for exercise in ExerciseType::ALL {
            *totals.entry(exercise).or_insert(0) += bucket.total_for(exercise);
        }
    }
    totals
}

pub fn weekly_total(day_map: &DayMap<'_>, today: NaiveDate) -> PerExercise<u64> {
    sum_days(day_map, &current_week_dates(today))
}

/// Percent change of this week against last week.
///
/// A zero baseline yields `None` whether or not this week has reps.
pub fn week_over_week(day_map: &DayMap<'_>, today: NaiveDate) -> PerExercise<Option<f64>> {
    let current = sum_days(day_map, &current_week_dates(today));
    let previous = sum_days(day_map, &previous_week_dates(today));

    ExerciseType::ALL
        .into_iter()
        .map(|exercise| {
            let cur = current.get(&exercise).copied().unwrap_or(0) as f64;
            let prev = previous.get(&exercise).copied().unwrap_or(0) as f64;
            let change = (prev > 0.0).then(|| (cur - prev) / prev * 100.0);
            (exercise, change)
        })
        .collect()
}

pub fn all_time_total(sets: &[SetRecord]) -> PerExercise<u64> {
    let mut totals = BTreeMap::new();
    for set in sets {
        *totals.entry(set.exercise).or_insert(0) += u64::from(set.count);
    }
    totals
}

// ─── Intensity ───────────────────────────────────────────────

pub fn avg_reps_per_set(sets: &[SetRecord]) -> PerExercise<f64> {
    let mut sums: BTreeMap<ExerciseType, (u64, u64)> = BTreeMap::new();
    for set in sets {
        let entry = sums.entry(set.exercise).or_insert((0, 0));
        entry.0 += u64::from(set.count);
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(exercise, (reps, count))| (exercise, round_tenths(reps as f64 / count as f64)))
        .collect()
}

/// Largest single set; the first one in input order wins ties.
pub fn best_set(sets: &[SetRecord]) -> PerExercise<ExerciseRecord> {
    let mut best: BTreeMap<ExerciseType, &SetRecord> = BTreeMap::new();
    for set in sets {
        best.entry(set.exercise)
            .and_modify(|current| {
                if set.count > current.count {
                    *current = set;
                }
            })
            .or_insert(set);
    }
    best.into_iter()
        .map(|(exercise, set)| {
            (
                exercise,
                ExerciseRecord {
                    count: set.count,
                    date: format_ymd(set.date),
                },
            )
        })
        .collect()
}

/// Mean number of sets on days the exercise was logged.
pub fn sets_per_day(sets: &[SetRecord]) -> PerExercise<f64> {
    let mut set_counts: BTreeMap<ExerciseType, u64> = BTreeMap::new();
    let mut days: BTreeMap<ExerciseType, HashSet<NaiveDate>> = BTreeMap::new();
    for set in sets {
        *set_counts.entry(set.exercise).or_insert(0) += 1;
        days.entry(set.exercise).or_default().insert(set.date);
    }
    set_counts
        .into_iter()
        .filter_map(|(exercise, count)| {
            let active_days = days.get(&exercise).map_or(0, HashSet::len);
            (active_days > 0).then(|| (exercise, round_tenths(count as f64 / active_days as f64)))
        })
        .collect()
}

/// Highest single-day total per exercise; the earliest day wins ties.
pub fn max_daily_volume(day_map: &DayMap<'_>) -> PerExercise<ExerciseRecord> {
    let mut result: BTreeMap<ExerciseType, (u64, NaiveDate)> = BTreeMap::new();
    for bucket in day_map.buckets() {
        for (&exercise, &total) in &bucket.totals_by_type {
            if total == 0 {
                continue;
            }
            let entry = result.entry(exercise).or_insert((total, bucket.date));
            if total > entry.0 {
                *entry = (total, bucket.date);
            }
        }
    }
    result
        .into_iter()
        .map(|(exercise, (total, date))| {
            (
                exercise,
                ExerciseRecord {
                    count: u32::try_from(total).unwrap_or(u32::MAX),
                    date: format_ymd(date),
                },
            )
        })
        .collect()
}

// ─── Patterns ────────────────────────────────────────────────

/// Average daily reps per weekday over every bucketed day.
pub fn day_of_week_heatmap(day_map: &DayMap<'_>) -> Vec<WeekdayData> {
    let mut totals = [0u64; 7];
    let mut counts = [0u32; 7];

    for bucket in day_map.buckets() {
        let idx = bucket.date.weekday().num_days_from_monday() as usize;
        totals[idx] += bucket.total_reps;
        counts[idx] += 1;
    }

    WEEKDAY_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| WeekdayData {
            day: name.to_string(),
            total: totals[i],
            count: counts[i],
            avg: if counts[i] > 0 {
                (totals[i] as f64 / f64::from(counts[i])).round() as u64
            } else {
                0
            },
        })
        .collect()
}

/// Each exercise's share of all reps, in percent.
pub fn exercise_balance(all_time_total: &PerExercise<u64>, grand_total: u64) -> PerExercise<f64> {
    if grand_total == 0 {
        return BTreeMap::new();
    }
    ExerciseType::ALL
        .into_iter()
        .map(|exercise| {
            let total = all_time_total.get(&exercise).copied().unwrap_or(0);
            let share = (total as f64 / grand_total as f64 * 1000.0).round() / 10.0;
            (exercise, share)
        })
        .collect()
}
