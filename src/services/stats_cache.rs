// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Memoized statistics keyed by a digest of their inputs.
//!
//! The dashboard re-requests stats every time a subscription fires, often
//! with an unchanged snapshot. Entries are keyed by SHA-256 over the
//! validated records (in input order) and the reference date, so a hit
//! always equals a fresh computation.

use crate::models::{ComputedStats, SetRecord, TargetRecord};
use crate::services::stats_engine::compute_all_stats;
use chrono::NaiveDate;
use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Shared stats cache.
pub struct StatsCache {
    entries: DashMap<String, Arc<ComputedStats>>,
    capacity: usize,
}

impl StatsCache {
    /// `capacity == 0` disables caching.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            capacity,
        }
    }

    /// Content digest for one stats request.
    pub fn key(
        sets: &[SetRecord],
        targets: &[TargetRecord],
        today: NaiveDate,
    ) -> Result<String, serde_json::Error> {
        let canonical = serde_json::to_vec(&(sets, targets, today))?;
        let mut hasher = Sha256::new();
        hasher.update(&canonical);
        Ok(hex::encode(hasher.finalize()))
    }

    /// Return cached stats or compute and remember them.
    pub fn get_or_compute(
        &self,
        sets: &[SetRecord],
        targets: &[TargetRecord],
        today: NaiveDate,
    ) -> Arc<ComputedStats> {
        if self.capacity == 0 {
            return Arc::new(compute_all_stats(sets, targets, today));
        }

        let key = match Self::key(sets, targets, today) {
            Ok(key) => key,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to hash stats input, computing uncached");
                return Arc::new(compute_all_stats(sets, targets, today));
            }
        };

        if let Some(hit) = self.entries.get(&key) {
            tracing::debug!(key = %key, "Stats cache hit");
            return Arc::clone(hit.value());
        }

        tracing::debug!(key = %key, "Stats cache miss");
        let stats = Arc::new(compute_all_stats(sets, targets, today));

        if self.entries.len() >= self.capacity {
            tracing::debug!(capacity = self.capacity, "Stats cache full, clearing");
            self.entries.clear();
        }
        self.entries.insert(key, Arc::clone(&stats));
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
