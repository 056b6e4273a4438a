// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod exercise;
pub(crate) mod fields;
pub mod set;
pub mod stats;
pub mod target;

pub use exercise::ExerciseType;
pub use set::{validate_sets, SetRecord, Validated};
pub use stats::ComputedStats;
pub use target::{validate_targets, EffectiveTarget, TargetRecord, TargetSchedule, TargetsAsOf};
