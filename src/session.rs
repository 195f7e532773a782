// Copyright (c) 2025 Spendlog Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Persisted owner identity. Spendlog never issues or refreshes
//! credentials; `login` stores what an external authentication flow
//! produced, and everything else just reads it back. No stored session
//! means local-fallback mode.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::cache;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique key of the authenticated user; scopes the remote ledger.
    pub user_id: String,
    /// Bearer credential appended to remote store requests.
    pub id_token: String,
    /// Base URL of the remote store.
    pub database_url: String,
}

pub fn session_path() -> Result<PathBuf> {
    Ok(cache::data_dir()?.join("session.json"))
}

/// Returns the stored session, or `None` when absent or unreadable.
pub fn load() -> Option<Session> {
    let path = session_path().ok()?;
    let body = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&body) {
        Ok(session) => Some(session),
        Err(e) => {
            tracing::warn!(error = %e, "corrupt session file, treating as signed out");
            None
        }
    }
}

pub fn save(session: &Session) -> Result<()> {
    let path = session_path()?;
    fs::write(path, serde_json::to_string_pretty(session)?)?;
    Ok(())
}

pub fn clear() -> Result<()> {
    let path = session_path()?;
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}
