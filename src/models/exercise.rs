// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exercise catalog.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A tracked exercise.
///
/// Variant order is the catalog order used for every per-type listing, so
/// `BTreeMap<ExerciseType, _>` iterates the same way the UI renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ExerciseType {
    Pushup,
    Pullup,
    Squat,
    Abs,
}

impl ExerciseType {
    /// Every exercise in catalog order.
    pub const ALL: [ExerciseType; 4] = [
        ExerciseType::Pushup,
        ExerciseType::Pullup,
        ExerciseType::Squat,
        ExerciseType::Abs,
    ];

    /// Storage key.
    pub fn key(self) -> &'static str {
        match self {
            ExerciseType::Pushup => "pushup",
            ExerciseType::Pullup => "pullup",
            ExerciseType::Squat => "squat",
            ExerciseType::Abs => "abs",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            ExerciseType::Pushup => "Push-ups",
            ExerciseType::Pullup => "Pull-ups",
            ExerciseType::Squat => "Squats",
            ExerciseType::Abs => "Abs",
        }
    }

    /// Chart color.
    pub fn color(self) -> &'static str {
        match self {
            ExerciseType::Pushup => "#8884d8",
            ExerciseType::Pullup => "#82ca9d",
            ExerciseType::Squat => "#ffc658",
            ExerciseType::Abs => "#ff7300",
        }
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error for exercise keys outside the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown exercise type: {0}")]
pub struct UnknownExercise(pub String);

impl FromStr for ExerciseType {
    type Err = UnknownExercise;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExerciseType::ALL
            .into_iter()
            .find(|t| t.key() == s)
            .ok_or_else(|| UnknownExercise(s.to_string()))
    }
}
