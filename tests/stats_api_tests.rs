// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end tests for the stats and view endpoints.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;
use trainbook::config::Config;

mod common;
use common::{post_json, set_doc};

#[tokio::test]
async fn test_health_check() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("Cache-Control").unwrap(), "no-store");
}

#[tokio::test]
async fn test_stats_two_day_scenario() {
    let (app, _) = common::create_test_app();

    let (status, body) = post_json(
        app,
        "/api/stats",
        json!({
            "items": [
                set_doc("a", "2024-01-01", "pushup", 10),
                set_doc("b", "2024-01-02", "pushup", 20),
            ],
            "targets": [],
            "today": "2024-01-02"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentStreak"], 2);
    assert_eq!(body["allTimeTotal"]["pushup"], 30);
    assert_eq!(body["grandTotal"], 30);
    assert_eq!(body["bestSet"]["pushup"], json!({"count": 20, "date": "2024-01-02"}));
    assert_eq!(body["avgRepsPerSet"]["pushup"], 15.0);
    assert_eq!(body["weeklyConsistency"], json!({"trained": 2, "total": 7}));
    assert_eq!(body["longestStreak"]["startDate"], "2024-01-01");
    assert_eq!(body["firstDate"], "2024-01-01");
    assert_eq!(body["lastDate"], "2024-01-02");
}

#[tokio::test]
async fn test_stats_skips_malformed_records() {
    let (app, _) = common::create_test_app();

    let (status, body) = post_json(
        app,
        "/api/stats",
        json!({
            "items": [
                set_doc("a", "2024-01-01", "squat", 10),
                {"id": "b", "date": "2024-01-01", "type": "squat", "count": "lots"},
                {"id": "c", "date": "2024-01-01", "count": 99},
                "garbage"
            ],
            "today": "2024-01-01"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["grandTotal"], 10);
}

#[tokio::test]
async fn test_stats_empty_snapshot() {
    let (app, _) = common::create_test_app();

    let (status, body) = post_json(app, "/api/stats", json!({"today": "2024-01-01"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currentStreak"], 0);
    assert_eq!(body["longestStreak"], json!({"length": 0, "startDate": "", "endDate": ""}));
    assert_eq!(body["exerciseBalance"], json!({}));
    assert_eq!(body["weekOverWeek"]["pushup"], serde_json::Value::Null);
    assert_eq!(body["dayOfWeekHeatmap"].as_array().unwrap().len(), 7);
    assert_eq!(body["totalDays"], 0);
}

#[tokio::test]
async fn test_stats_rejects_invalid_today() {
    let (app, _) = common::create_test_app();

    let (status, body) = post_json(app, "/api/stats", json!({"today": "2024-13-01"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_stats_rejects_too_many_records() {
    let config = Config {
        max_records_per_request: 1,
        ..Config::default()
    };
    let (app, _) = common::create_test_app_with(config);

    let (status, _) = post_json(
        app,
        "/api/stats",
        json!({
            "items": [
                set_doc("a", "2024-01-01", "abs", 10),
                set_doc("b", "2024-01-02", "abs", 10),
            ],
            "today": "2024-01-02"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_stats_are_cached() {
    let (app, state) = common::create_test_app();
    let body = json!({
        "items": [set_doc("a", "2024-01-01", "pullup", 8)],
        "today": "2024-01-01"
    });

    let (first_status, first) = post_json(app.clone(), "/api/stats", body.clone()).await;
    let (_, second) = post_json(app, "/api/stats", body).await;

    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(state.stats_cache.len(), 1);
}

#[tokio::test]
async fn test_target_hit_rate_over_api() {
    let (app, _) = common::create_test_app();

    let (status, body) = post_json(
        app,
        "/api/stats",
        json!({
            "items": [set_doc("a", "2024-03-04", "pushup", 12)],
            "targets": [{"type": "pushup", "value": 10, "date": "2024-03-04"}],
            "today": "2024-03-04"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["targetHitRate"],
        json!({"pushup": {"hit": 1, "total": 1, "rate": 1.0}})
    );
}

#[tokio::test]
async fn test_targets_as_of() {
    let (app, _) = common::create_test_app();

    let (status, body) = post_json(
        app,
        "/api/targets/as-of",
        json!({
            "targets": [
                {"type": "squat", "value": 50, "date": "2024-01-01"},
                {"type": "squat", "value": 80, "date": "2024-02-01"},
                {"type": "abs", "value": 100, "date": "2024-03-01"}
            ],
            "date": "2024-02-15"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"squat": {"value": 80, "date": "2024-02-01"}}));
}

#[tokio::test]
async fn test_today_progress() {
    let (app, _) = common::create_test_app();

    let (status, body) = post_json(
        app,
        "/api/today",
        json!({
            "items": [
                set_doc("a", "2024-01-10", "pushup", 20),
                set_doc("b", "2024-01-10", "pushup", 25),
                set_doc("c", "2024-01-09", "pushup", 99)
            ],
            "targets": [{"type": "pushup", "value": 40, "date": "2024-01-01"}],
            "today": "2024-01-10"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let pushups = &body["exercises"][0];
    assert_eq!(pushups["type"], "pushup");
    assert_eq!(pushups["counts"], json!([20, 25]));
    assert_eq!(pushups["total"], 45);
    assert_eq!(pushups["remaining"], 0);
    assert_eq!(pushups["targetMet"], true);
}

#[tokio::test]
async fn test_history_newest_first() {
    let (app, _) = common::create_test_app();

    let (status, body) = post_json(
        app,
        "/api/history",
        json!({
            "items": [
                set_doc("a", "2024-01-08", "abs", 10),
                set_doc("b", "2024-01-10", "squat", 10)
            ],
            "today": "2024-01-10"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let days = body.as_array().unwrap();
    assert_eq!(days.len(), 2);
    assert_eq!(days[0]["date"], "2024-01-10");
    assert_eq!(days[0]["relative"], "Today");
    assert_eq!(days[1]["relative"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_series_month_window() {
    let (app, _) = common::create_test_app();

    let (status, body) = post_json(
        app,
        "/api/series",
        json!({
            "items": [
                set_doc("old", "2023-12-01", "abs", 10),
                set_doc("a", "2024-01-08", "pushup", 10),
                set_doc("b", "2024-01-10", "pushup", 30)
            ],
            "period": "30d",
            "today": "2024-01-10"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["period"], "30d");
    assert_eq!(body["types"], json!(["pushup"]));
    assert_eq!(body["colors"], json!({"pushup": "#8884d8"}));
    assert_eq!(body["rows"].as_array().unwrap().len(), 3);
    assert_eq!(body["maxValue"], 30);
}

#[tokio::test]
async fn test_series_rejects_unknown_period() {
    let (app, _) = common::create_test_app();

    let (status, _) = post_json(
        app,
        "/api/series",
        json!({"items": [], "period": "1y", "today": "2024-01-10"}),
    )
    .await;

    assert!(status.is_client_error());
}

#[tokio::test]
async fn test_stats_skips_dates_outside_supported_years() {
    let (app, _) = common::create_test_app();

    let (status, body) = post_json(
        app,
        "/api/stats",
        json!({
            "items": [
                set_doc("ancient", "0000-01-01", "pushup", 10),
                set_doc("far", "9999-12-31", "pushup", 10),
                set_doc("a", "2024-01-01", "pushup", 7)
            ],
            "today": "2024-01-01"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["grandTotal"], 7);
    assert_eq!(body["totalDays"], 1);
    assert_eq!(body["lastDate"], "2024-01-01");
}

#[tokio::test]
async fn test_stats_rejects_far_future_today() {
    let (app, _) = common::create_test_app();

    let (status, body) = post_json(
        app,
        "/api/stats",
        json!({"items": [set_doc("a", "2024-01-01", "abs", 5)], "today": "9999-12-31"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}
