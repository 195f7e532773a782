// Copyright (c) 2025 Spendlog Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Deserialize;
use serde_json::Value;

use crate::error::LedgerError;
use crate::models::{ExpensePatch, ExpenseRecord};
use crate::utils::http_client;

/// Translates ledger operations into remote store calls for one owner
/// identity. Writes fail loudly; reads never fail the caller (see
/// [`RemoteLedger::fetch_all`]).
pub trait RemoteLedger {
    fn create(
        &self,
        owner_id: &str,
        credential: &str,
        record: &ExpenseRecord,
    ) -> Result<ExpenseRecord, LedgerError>;

    /// Returns the owner's records newest first, or an empty list when the
    /// owner has none or the remote call errors. Read failures are logged
    /// here rather than propagated so a flaky network cannot block the
    /// initial load.
    fn fetch_all(&self, owner_id: &str, credential: &str) -> Vec<ExpenseRecord>;

    fn update(
        &self,
        owner_id: &str,
        credential: &str,
        id: &str,
        patch: &ExpensePatch,
    ) -> Result<(), LedgerError>;

    fn remove(&self, owner_id: &str, credential: &str, id: &str) -> Result<(), LedgerError>;
}

/// Remote store client speaking the Firebase Realtime Database REST
/// dialect: per-owner collection at `/users/{uid}/expenses.json`, bearer
/// credential as the `auth` query parameter, generated id in the `name`
/// field of the create response.
pub struct FirebaseGateway {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl FirebaseGateway {
    pub fn new(database_url: &str) -> Result<Self> {
        Ok(FirebaseGateway {
            client: http_client()?,
            base_url: database_url.trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self, owner_id: &str, credential: &str) -> String {
        format!(
            "{}/users/{}/expenses.json?auth={}",
            self.base_url, owner_id, credential
        )
    }

    fn item_url(&self, owner_id: &str, credential: &str, id: &str) -> String {
        format!(
            "{}/users/{}/expenses/{}.json?auth={}",
            self.base_url, owner_id, credential, id
        )
    }

    fn require_auth(owner_id: &str, credential: &str) -> Result<(), LedgerError> {
        if owner_id.is_empty() || credential.is_empty() {
            return Err(LedgerError::Unauthenticated);
        }
        Ok(())
    }
}

/// Shape of the store's create response.
#[derive(Deserialize)]
struct CreatedName {
    name: String,
}

/// Maps a non-success write response to `RemoteWriteFailed`, preferring the
/// store's own error message when the payload carries one.
fn write_failure(status: reqwest::StatusCode, body: &str) -> LedgerError {
    let store_message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str().map(String::from)));
    LedgerError::RemoteWriteFailed(
        store_message.unwrap_or_else(|| format!("remote store rejected the write (HTTP {})", status)),
    )
}

/// Normalizes the store's id->fields tree into records: each entry is
/// annotated with its key as the id, amounts are coerced to numbers, and
/// the result is ordered by descending id. The store's ids are
/// monotonically sortable, so descending id order is newest first.
pub fn records_from_tree(tree: Value) -> Vec<ExpenseRecord> {
    let Value::Object(entries) = tree else {
        // An empty collection comes back as JSON null.
        return Vec::new();
    };
    let mut records: Vec<ExpenseRecord> = entries
        .into_iter()
        .filter_map(|(id, fields)| match serde_json::from_value::<ExpenseRecord>(fields) {
            Ok(mut rec) => {
                rec.id = id;
                Some(rec)
            }
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "skipping malformed remote record");
                None
            }
        })
        .collect();
    records.sort_by(|a, b| b.id.cmp(&a.id));
    records
}

impl RemoteLedger for FirebaseGateway {
    fn create(
        &self,
        owner_id: &str,
        credential: &str,
        record: &ExpenseRecord,
    ) -> Result<ExpenseRecord, LedgerError> {
        Self::require_auth(owner_id, credential)?;
        let resp = self
            .client
            .post(self.collection_url(owner_id, credential))
            .json(record)
            .send()
            .map_err(|e| LedgerError::RemoteWriteFailed(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(write_failure(status, &body));
        }
        let created: CreatedName = resp
            .json()
            .map_err(|e| LedgerError::RemoteWriteFailed(e.to_string()))?;
        let mut saved = record.clone();
        saved.id = created.name;
        Ok(saved)
    }

    fn fetch_all(&self, owner_id: &str, credential: &str) -> Vec<ExpenseRecord> {
        if let Err(e) = Self::require_auth(owner_id, credential) {
            tracing::warn!(error = %e, "fetch skipped");
            return Vec::new();
        }
        let resp = match self
            .client
            .get(self.collection_url(owner_id, credential))
            .send()
        {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(error = %LedgerError::RemoteReadFailed(e.to_string()), "presenting empty ledger");
                return Vec::new();
            }
        };
        if !resp.status().is_success() {
            let err = LedgerError::RemoteReadFailed(format!("HTTP {}", resp.status()));
            tracing::warn!(error = %err, "presenting empty ledger");
            return Vec::new();
        }
        match resp.json::<Value>() {
            Ok(tree) => records_from_tree(tree),
            Err(e) => {
                tracing::warn!(error = %LedgerError::RemoteReadFailed(e.to_string()), "presenting empty ledger");
                Vec::new()
            }
        }
    }

    fn update(
        &self,
        owner_id: &str,
        credential: &str,
        id: &str,
        patch: &ExpensePatch,
    ) -> Result<(), LedgerError> {
        Self::require_auth(owner_id, credential)?;
        let resp = self
            .client
            .patch(self.item_url(owner_id, credential, id))
            .json(patch)
            .send()
            .map_err(|e| LedgerError::RemoteWriteFailed(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(write_failure(status, &body));
        }
        Ok(())
    }

    fn remove(&self, owner_id: &str, credential: &str, id: &str) -> Result<(), LedgerError> {
        Self::require_auth(owner_id, credential)?;
        let resp = self
            .client
            .delete(self.item_url(owner_id, credential, id))
            .send()
            .map_err(|e| LedgerError::RemoteWriteFailed(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(write_failure(status, &body));
        }
        Ok(())
    }
}
