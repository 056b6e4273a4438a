// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! TrainBook: statistics for a personal exercise log
//!
//! This crate turns a user's logged sets and daily targets into dashboard
//! statistics (streaks, weekly volume, personal records, weekday patterns)
//! and serves them over a small stateless JSON API.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::StatsCache;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub stats_cache: Arc<StatsCache>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let stats_cache = Arc::new(StatsCache::new(config.stats_cache_capacity));
        Self {
            config,
            stats_cache,
        }
    }
}
