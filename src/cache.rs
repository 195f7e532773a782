// Copyright (c) 2025 Spendlog Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::LedgerError;
use crate::models::ExpenseRecord;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("dev.spendlog", "Spendlog", "spendlog"));

pub fn data_dir() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.to_path_buf())
}

/// Durable mirror of the ledger for local-fallback mode: one JSON slot
/// holding the full record list. Every save re-serializes the whole ledger;
/// this is a complete-snapshot strategy, not incremental.
///
/// Neither direction surfaces failures to the caller. A missing or corrupt
/// snapshot loads as an empty ledger, and write failures are logged and
/// dropped.
pub struct FallbackCache {
    path: PathBuf,
}

impl FallbackCache {
    pub fn open_default() -> Result<Self> {
        Ok(FallbackCache {
            path: data_dir()?.join("expenses.json"),
        })
    }

    pub fn at(path: PathBuf) -> Self {
        FallbackCache { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, records: &[ExpenseRecord]) {
        if let Err(e) = self.try_save(records) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to persist ledger snapshot");
        }
    }

    fn try_save(&self, records: &[ExpenseRecord]) -> Result<(), LedgerError> {
        let body = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, body)
            .map_err(|e| LedgerError::Serialization(serde_json::Error::io(e)))?;
        Ok(())
    }

    pub fn load(&self) -> Vec<ExpenseRecord> {
        let body = match fs::read_to_string(&self.path) {
            Ok(body) => body,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read ledger snapshot");
                return Vec::new();
            }
        };
        match serde_json::from_str(&body) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "corrupt ledger snapshot, starting empty");
                Vec::new()
            }
        }
    }
}
