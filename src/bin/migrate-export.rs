// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Upgrade a TrainBook export file in place.
//!
//! Older `trainbook.v1` exports predate targets and have no `targets`
//! array. This adds an empty one so the file can be imported again.
//!
//! Usage: `migrate-export path/to/trainbook-items.json`

use anyhow::{bail, Context};
use serde_json::Value;
use std::path::PathBuf;
use std::process::ExitCode;
use trainbook::services::migrate_export;

fn run() -> anyhow::Result<()> {
    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        bail!("Usage: migrate-export <export-file.json>");
    };

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Cannot read file: {}", path.display()))?;
    let doc: Value = serde_json::from_str(&raw).context("Invalid JSON")?;

    let (migrated, changed) = migrate_export(doc)?;
    if !changed {
        println!("File already has targets, no changes needed.");
        return Ok(());
    }

    println!("Added empty targets array");
    let mut out = serde_json::to_string_pretty(&migrated)?;
    out.push('\n');
    std::fs::write(&path, out)
        .with_context(|| format!("Cannot write file: {}", path.display()))?;
    println!("Updated: {}", path.display());
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
