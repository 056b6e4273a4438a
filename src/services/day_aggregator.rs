// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Groups logged sets into per-calendar-day buckets.
//!
//! The bucket map covers every day from the first logged date through
//! "today", with empty buckets for days without sets. Streak, consistency
//! and hit-rate logic rely on those gaps being present.

use crate::models::{ExerciseType, SetRecord};
use crate::time_utils::add_days;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// One day's aggregate.
#[derive(Debug, Clone)]
pub struct DayBucket<'a> {
    pub date: NaiveDate,
    /// Reps per exercise; exercises not logged that day are absent
    pub totals_by_type: BTreeMap<ExerciseType, u64>,
    /// Sets per exercise ordered by insertion time
    pub sets_by_type: BTreeMap<ExerciseType, Vec<&'a SetRecord>>,
    pub total_reps: u64,
}

impl<'a> DayBucket<'a> {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            totals_by_type: BTreeMap::new(),
            sets_by_type: BTreeMap::new(),
            total_reps: 0,
        }
    }

    fn push(&mut self, set: &'a SetRecord) {
        let count = u64::from(set.count);
        *self.totals_by_type.entry(set.exercise).or_insert(0) += count;
        self.sets_by_type.entry(set.exercise).or_default().push(set);
        self.total_reps += count;
    }

    /// Reps logged for `exercise` on this day.
    pub fn total_for(&self, exercise: ExerciseType) -> u64 {
        self.totals_by_type.get(&exercise).copied().unwrap_or(0)
    }

    /// At least one set was logged.
    pub fn is_active(&self) -> bool {
        !self.sets_by_type.is_empty()
    }
}

/// Date-keyed buckets plus the distinct dates that had sets.
#[derive(Debug, Clone, Default)]
pub struct DayMap<'a> {
    days: BTreeMap<NaiveDate, DayBucket<'a>>,
    active_dates: Vec<NaiveDate>,
}

impl<'a> DayMap<'a> {
    pub fn get(&self, date: NaiveDate) -> Option<&DayBucket<'a>> {
        self.days.get(&date)
    }

    /// Whether `date` has a bucket with at least one set.
    pub fn is_active(&self, date: NaiveDate) -> bool {
        self.get(date).is_some_and(DayBucket::is_active)
    }

    /// Buckets in chronological order, gap days included.
    pub fn buckets(&self) -> impl Iterator<Item = &DayBucket<'a>> {
        self.days.values()
    }

    /// Sorted distinct dates present in the input.
    pub fn active_dates(&self) -> &[NaiveDate] {
        &self.active_dates
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Build the bucket map for `records` as seen on `today`.
///
/// Gap days are filled from the first record through `today` only. A
/// record dated after `today` gets its own bucket; the days between
/// `today` and that record stay absent.
pub fn build_day_map(records: &[SetRecord], today: NaiveDate) -> DayMap<'_> {
    let Some(first) = records.iter().map(|r| r.date).min() else {
        return DayMap::default();
    };

    let mut days = BTreeMap::new();
    let mut cursor = first;
    while cursor <= today {
        days.insert(cursor, DayBucket::empty(cursor));
        let next = add_days(cursor, 1);
        if next == cursor {
            break;
        }
        cursor = next;
    }

    for record in records {
        days.entry(record.date)
            .or_insert_with(|| DayBucket::empty(record.date))
            .push(record);
    }

    for bucket in days.values_mut() {
        for sets in bucket.sets_by_type.values_mut() {
            sets.sort_by_key(|s| s.created_at);
        }
    }

    let active_dates = days
        .values()
        .filter(|b| b.is_active())
        .map(|b| b.date)
        .collect();

    DayMap { days, active_dates }
}
