// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stats API routes.
//!
//! Every endpoint is stateless: the caller posts the user's current record
//! snapshot (as loaded from the document store) and gets derived data back.

use crate::error::{AppError, Result};
use crate::models::{
    validate_sets, validate_targets, ComputedStats, SetRecord, TargetRecord, TargetSchedule,
    TargetsAsOf,
};
use crate::services::export::{build_export, migrate_export, parse_export_value, ExportDocument};
use crate::services::views::{DailySeries, HistoryDay, TodayProgress};
use crate::services::{daily_series, history, today_progress, SeriesPeriod};
use crate::time_utils::resolve_today;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::post,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/stats", post(post_stats))
        .route("/api/targets/as-of", post(post_targets_as_of))
        .route("/api/today", post(post_today))
        .route("/api/history", post(post_history))
        .route("/api/series", post(post_series))
        .route("/api/export", post(post_export))
        .route("/api/export/migrate", post(post_migrate_export))
        .route("/api/import/preview", post(post_import_preview))
}

// ─── Requests ────────────────────────────────────────────────

/// A user's record snapshot plus an optional reference day.
#[derive(Debug, Deserialize, Validate)]
pub struct SnapshotRequest {
    #[serde(default)]
    #[validate(length(max = 100000))]
    pub items: Vec<Value>,
    #[serde(default)]
    #[validate(length(max = 100000))]
    pub targets: Vec<Value>,
    /// `YYYY-MM-DD`, defaults to the server's local date
    #[validate(length(equal = 10))]
    pub today: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SeriesRequest {
    #[serde(default)]
    #[validate(length(max = 100000))]
    pub items: Vec<Value>,
    #[serde(default)]
    pub period: SeriesPeriod,
    #[validate(length(equal = 10))]
    pub today: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct TargetsAsOfRequest {
    #[serde(default)]
    #[validate(length(max = 100000))]
    pub targets: Vec<Value>,
    #[validate(length(equal = 10))]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ExportRequest {
    #[validate(length(min = 1, max = 128))]
    pub uid: String,
    #[serde(default)]
    #[validate(length(max = 100000))]
    pub items: Vec<Value>,
    #[serde(default)]
    #[validate(length(max = 100000))]
    pub targets: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct TodayQuery {
    today: Option<String>,
}

/// Validated records ready for the engine.
struct Snapshot {
    sets: Vec<SetRecord>,
    targets: Vec<TargetRecord>,
}

fn check_record_limit(state: &AppState, count: usize) -> Result<()> {
    let limit = state.config.max_records_per_request;
    if count > limit {
        return Err(AppError::BadRequest(format!(
            "Too many records: {count} (limit {limit})"
        )));
    }
    Ok(())
}

fn load_snapshot(state: &AppState, items: &[Value], targets: &[Value]) -> Result<Snapshot> {
    check_record_limit(state, items.len() + targets.len())?;

    let sets = validate_sets(items);
    let targets = validate_targets(targets);
    if sets.skipped > 0 || targets.skipped > 0 {
        tracing::debug!(
            skipped_sets = sets.skipped,
            skipped_targets = targets.skipped,
            "Dropped malformed records"
        );
    }

    Ok(Snapshot {
        sets: sets.records,
        targets: targets.records,
    })
}

// ─── Statistics ──────────────────────────────────────────────

/// Compute dashboard statistics.
async fn post_stats(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SnapshotRequest>,
) -> Result<Json<ComputedStats>> {
    req.validate()?;
    let today = resolve_today(req.today.as_deref())?;
    let snapshot = load_snapshot(&state, &req.items, &req.targets)?;

    let stats = cached_stats(&state, snapshot.sets, snapshot.targets, today).await?;
    Ok(Json(stats.as_ref().clone()))
}

/// Run the stats engine through the cache off the async executor.
async fn cached_stats(
    state: &AppState,
    sets: Vec<SetRecord>,
    targets: Vec<TargetRecord>,
    today: NaiveDate,
) -> Result<Arc<ComputedStats>> {
    let cache = Arc::clone(&state.stats_cache);
    let stats = tokio::task::spawn_blocking(move || cache.get_or_compute(&sets, &targets, today))
        .await
        .map_err(|e| anyhow::anyhow!("Stats computation failed: {}", e))?;
    Ok(stats)
}

/// Effective targets on a given day.
async fn post_targets_as_of(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TargetsAsOfRequest>,
) -> Result<Json<TargetsAsOf>> {
    req.validate()?;
    let date = resolve_today(req.date.as_deref())?;
    let snapshot = load_snapshot(&state, &[], &req.targets)?;

    let schedule = TargetSchedule::from_records(&snapshot.targets);
    Ok(Json(schedule.targets_as_of(date)))
}

// ─── Views ───────────────────────────────────────────────────

async fn post_today(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SnapshotRequest>,
) -> Result<Json<TodayProgress>> {
    req.validate()?;
    let today = resolve_today(req.today.as_deref())?;
    let snapshot = load_snapshot(&state, &req.items, &req.targets)?;

    let schedule = TargetSchedule::from_records(&snapshot.targets);
    Ok(Json(today_progress(&snapshot.sets, &schedule, today)))
}

async fn post_history(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SnapshotRequest>,
) -> Result<Json<Vec<HistoryDay>>> {
    req.validate()?;
    let today = resolve_today(req.today.as_deref())?;
    let snapshot = load_snapshot(&state, &req.items, &[])?;

    Ok(Json(history(&snapshot.sets, today)))
}

async fn post_series(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SeriesRequest>,
) -> Result<Json<DailySeries>> {
    req.validate()?;
    let today = resolve_today(req.today.as_deref())?;
    let snapshot = load_snapshot(&state, &req.items, &[])?;

    Ok(Json(daily_series(&snapshot.sets, req.period, today)))
}

// ─── Export / Import ─────────────────────────────────────────

/// Build a `trainbook.v1` export from a snapshot.
async fn post_export(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ExportRequest>,
) -> Result<Json<ExportDocument>> {
    req.validate()?;
    let snapshot = load_snapshot(&state, &req.items, &req.targets)?;

    tracing::info!(
        sets = snapshot.sets.len(),
        targets = snapshot.targets.len(),
        "Building export"
    );

    Ok(Json(build_export(
        &req.uid,
        &snapshot.sets,
        &snapshot.targets,
        chrono::Utc::now(),
    )))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MigrateResponse {
    pub changed: bool,
    #[cfg_attr(feature = "binding-generation", ts(type = "unknown"))]
    pub document: Value,
}

/// Upgrade an older export document.
async fn post_migrate_export(Json(doc): Json<Value>) -> Result<Json<MigrateResponse>> {
    let (document, changed) = migrate_export(doc)?;
    if changed {
        tracing::info!("Added empty targets array to export");
    }
    Ok(Json(MigrateResponse { changed, document }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ImportPreviewResponse {
    pub uid: Option<String>,
    pub exported_at: Option<String>,
    pub items: Vec<SetRecord>,
    pub targets: Vec<TargetRecord>,
    pub skipped_items: usize,
    pub skipped_targets: usize,
    pub stats: ComputedStats,
}

/// Validate an export and preview what importing it would produce.
async fn post_import_preview(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TodayQuery>,
    Json(doc): Json<Value>,
) -> Result<Json<ImportPreviewResponse>> {
    let today = resolve_today(query.today.as_deref())?;
    let snapshot = parse_export_value(&doc)?;
    check_record_limit(
        &state,
        snapshot.sets.records.len() + snapshot.targets.records.len(),
    )?;

    let stats = cached_stats(
        &state,
        snapshot.sets.records.clone(),
        snapshot.targets.records.clone(),
        today,
    )
    .await?;

    Ok(Json(ImportPreviewResponse {
        uid: snapshot.uid,
        exported_at: snapshot.exported_at,
        skipped_items: snapshot.sets.skipped,
        skipped_targets: snapshot.targets.skipped,
        items: snapshot.sets.records,
        targets: snapshot.targets.records,
        stats: stats.as_ref().clone(),
    }))
}
