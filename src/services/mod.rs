// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod day_aggregator;
pub mod export;
pub mod stats_cache;
pub mod stats_engine;
pub mod views;

pub use day_aggregator::{build_day_map, DayBucket, DayMap};
pub use export::{build_export, migrate_export, parse_export, ExportError, ImportSnapshot};
pub use stats_cache::StatsCache;
pub use stats_engine::compute_all_stats;
pub use views::{daily_series, history, today_progress, SeriesPeriod};
