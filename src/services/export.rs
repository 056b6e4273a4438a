// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! `trainbook.v1` export documents.
//!
//! Layout:
//! ```json
//! {
//!   "schema": "trainbook.v1",
//!   "uid": "...",
//!   "exportedAt": "2024-01-15T10:30:00Z",
//!   "items": [{ "id": "...", "data": { "date": "...", "type": "...", "count": 10 } }],
//!   "targets": [{ "type": "...", "value": 50, "date": "..." }]
//! }
//! ```
//! Exports written before targets existed have no `targets` array;
//! [`migrate_export`] adds an empty one.

use crate::models::{validate_sets, validate_targets, SetRecord, TargetRecord, Validated};
use crate::time_utils::{format_utc_rfc3339, format_ymd};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Schema identifier written into every export.
pub const EXPORT_SCHEMA: &str = "trainbook.v1";

/// Errors from reading an export document.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Missing or wrong schema (expected \"trainbook.v1\", found {0})")]
    SchemaMismatch(String),

    #[error("Invalid payload: expected {{ items: [...] }}")]
    MissingItems,
}

/// One exported set: document ID plus its stored fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportItem {
    pub id: String,
    pub data: Value,
}

/// A full export document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub schema: String,
    pub uid: String,
    pub exported_at: String,
    pub items: Vec<ExportItem>,
    #[serde(default)]
    pub targets: Vec<Value>,
}

/// Validated contents of an export.
#[derive(Debug, Clone, Default)]
pub struct ImportSnapshot {
    pub uid: Option<String>,
    pub exported_at: Option<String>,
    pub sets: Validated<SetRecord>,
    pub targets: Validated<TargetRecord>,
}

/// Serialize records into an export document.
pub fn build_export(
    uid: &str,
    sets: &[SetRecord],
    targets: &[TargetRecord],
    exported_at: DateTime<Utc>,
) -> ExportDocument {
    let items = sets
        .iter()
        .map(|set| {
            let mut data = json!({
                "date": format_ymd(set.date),
                "type": set.exercise,
                "count": set.count,
            });
            if let (Some(created_at), Some(obj)) = (set.created_at, data.as_object_mut()) {
                obj.insert(
                    "createdAt".to_string(),
                    Value::String(format_utc_rfc3339(created_at)),
                );
            }
            ExportItem {
                id: set.id.clone(),
                data,
            }
        })
        .collect();

    let targets = targets
        .iter()
        .map(|target| {
            let mut doc = json!({
                "type": target.exercise,
                "value": target.value,
                "date": format_ymd(target.date),
            });
            if let (Some(created_at), Some(obj)) = (target.created_at, doc.as_object_mut()) {
                obj.insert(
                    "createdAt".to_string(),
                    Value::String(format_utc_rfc3339(created_at)),
                );
            }
            doc
        })
        .collect();

    ExportDocument {
        schema: EXPORT_SCHEMA.to_string(),
        uid: uid.to_string(),
        exported_at: format_utc_rfc3339(exported_at),
        items,
        targets,
    }
}

fn check_schema(doc: &Value) -> Result<(), ExportError> {
    match doc.get("schema") {
        Some(Value::String(s)) if s == EXPORT_SCHEMA => Ok(()),
        Some(other) => Err(ExportError::SchemaMismatch(other.to_string())),
        None => Err(ExportError::SchemaMismatch("nothing".to_string())),
    }
}

/// Flatten an `{id, data}` entry into one document.
///
/// Bare documents (no `data` wrapper) pass through unchanged. The outer
/// `id` fills in when the inner document has none.
fn unwrap_entry(entry: &Value) -> Value {
    let Some(Value::Object(inner)) = entry.get("data") else {
        return entry.clone();
    };
    let mut flat: Map<String, Value> = inner.clone();
    if !flat.contains_key("id") {
        if let Some(id) = entry.get("id") {
            flat.insert("id".to_string(), id.clone());
        }
    }
    Value::Object(flat)
}

/// Read a validated export document.
pub fn parse_export_value(doc: &Value) -> Result<ImportSnapshot, ExportError> {
    check_schema(doc)?;

    let items = doc
        .get("items")
        .and_then(Value::as_array)
        .ok_or(ExportError::MissingItems)?;
    let items: Vec<Value> = items.iter().map(unwrap_entry).collect();

    let targets: Vec<Value> = doc
        .get("targets")
        .and_then(Value::as_array)
        .map(|t| t.iter().map(unwrap_entry).collect())
        .unwrap_or_default();

    let snapshot = ImportSnapshot {
        uid: doc.get("uid").and_then(Value::as_str).map(String::from),
        exported_at: doc
            .get("exportedAt")
            .and_then(Value::as_str)
            .map(String::from),
        sets: validate_sets(&items),
        targets: validate_targets(&targets),
    };

    tracing::info!(
        sets = snapshot.sets.records.len(),
        skipped_sets = snapshot.sets.skipped,
        targets = snapshot.targets.records.len(),
        skipped_targets = snapshot.targets.skipped,
        "Parsed export"
    );

    Ok(snapshot)
}

/// Parse export text.
pub fn parse_export(text: &str) -> Result<ImportSnapshot, ExportError> {
    let doc: Value = serde_json::from_str(text)?;
    parse_export_value(&doc)
}

/// Bring an older export up to the current layout.
///
/// Returns the document and whether anything changed.
pub fn migrate_export(mut doc: Value) -> Result<(Value, bool), ExportError> {
    check_schema(&doc)?;

    let Some(obj) = doc.as_object_mut() else {
        return Err(ExportError::MissingItems);
    };

    let mut changed = false;
    if !obj.get("targets").is_some_and(Value::is_array) {
        obj.insert("targets".to_string(), Value::Array(Vec::new()));
        changed = true;
    }

    Ok((doc, changed))
}
