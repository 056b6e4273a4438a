// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use trainbook::error::AppError;
use trainbook::services::{parse_export, ExportError};
use trainbook::time_utils::parse_ymd;

async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_bad_request_response() {
    let (status, body) = body_json(AppError::BadRequest("nope".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
    assert_eq!(body["details"], "nope");
}

#[tokio::test]
async fn test_invalid_date_maps_to_bad_request() {
    let err: AppError = parse_ymd("2024-02-30").unwrap_err().into();
    let (status, body) = body_json(err).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].as_str().unwrap().contains("2024-02-30"));
}

#[tokio::test]
async fn test_export_error_maps_to_unprocessable() {
    let err: AppError = parse_export("[]").unwrap_err().into();
    let (status, body) = body_json(err).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "invalid_export");
}

#[tokio::test]
async fn test_internal_error_hides_details() {
    let err: AppError = anyhow::anyhow!("disk on fire").into();
    let (status, body) = body_json(err).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal_error");
    assert!(body.get("details").is_none());
}

#[test]
fn test_export_error_messages() {
    let err = ExportError::SchemaMismatch("\"pushups.v0\"".to_string());
    assert!(err.to_string().contains("trainbook.v1"));
    assert!(ExportError::MissingItems.to_string().contains("items"));
}
