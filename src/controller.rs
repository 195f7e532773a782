// Copyright (c) 2025 Spendlog Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use crate::cache::FallbackCache;
use crate::error::LedgerError;
use crate::gateway::RemoteLedger;
use crate::models::{ExpenseDraft, ExpenseRecord};
use crate::store::{LedgerState, Mutation};
use crate::utils;

/// Owner identity plus the bearer credential for remote store calls. Both
/// come from the external authentication flow; absence selects
/// local-fallback mode.
#[derive(Debug, Clone)]
pub struct Identity {
    pub owner_id: String,
    pub credential: String,
}

/// How mutations reach the store, fixed once at construction.
///
/// `ConfirmThenApply` (remote mode) waits for the gateway before touching
/// the store, so the UI only ever shows server-confirmed records.
/// `ApplyImmediately` (local-fallback mode) mutates optimistically and
/// mirrors the full snapshot into the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePolicy {
    ConfirmThenApply,
    ApplyImmediately,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Uninitialized,
    Loading,
    Ready,
}

/// Read-only projection handed to UI surfaces.
pub struct LedgerView<'a> {
    pub records: &'a [ExpenseRecord],
    pub total_amount: Decimal,
    pub is_loading: bool,
    pub error: Option<&'a str>,
}

/// Orchestrates the ledger session: remote-first load with local fallback,
/// gateway calls on mutation, and cache mirroring. One instance per
/// session, passed explicitly to consumers.
///
/// Failures never latch: every error lands in a transient `error` field and
/// the controller stays operational. Create/update errors propagate to the
/// caller as well; delete and read errors are absorbed.
pub struct LedgerController<G: RemoteLedger> {
    gateway: G,
    cache: FallbackCache,
    identity: Option<Identity>,
    policy: WritePolicy,
    phase: Phase,
    state: LedgerState,
    error: Option<String>,
}

impl<G: RemoteLedger> LedgerController<G> {
    pub fn new(gateway: G, cache: FallbackCache, identity: Option<Identity>) -> Self {
        let policy = if identity.is_some() {
            WritePolicy::ConfirmThenApply
        } else {
            WritePolicy::ApplyImmediately
        };
        LedgerController {
            gateway,
            cache,
            identity,
            policy,
            phase: Phase::Uninitialized,
            state: LedgerState::default(),
            error: None,
        }
    }

    pub fn policy(&self) -> WritePolicy {
        self.policy
    }

    /// Initial population of the store. With an identity the remote ledger
    /// is authoritative (the gateway already degrades read failures to an
    /// empty list); without one the cached snapshot is the working set.
    pub fn load(&mut self) {
        self.phase = Phase::Loading;
        let records = match &self.identity {
            Some(identity) => self
                .gateway
                .fetch_all(&identity.owner_id, &identity.credential),
            None => self.cache.load(),
        };
        self.state.dispatch(Mutation::Load(records));
        self.phase = Phase::Ready;
    }

    /// Records a new expense. Remote mode confirms with the store first and
    /// only then applies the server-assigned record; local mode assigns a
    /// clock-derived id, applies immediately, and re-persists the snapshot.
    pub fn add_expense(&mut self, draft: ExpenseDraft) -> Result<(), LedgerError> {
        let record = draft.into_record();
        match self.policy {
            WritePolicy::ConfirmThenApply => {
                let outcome = self
                    .identity
                    .as_ref()
                    .ok_or(LedgerError::Unauthenticated)
                    .and_then(|identity| {
                        self.gateway
                            .create(&identity.owner_id, &identity.credential, &record)
                    });
                match outcome {
                    Ok(saved) => {
                        self.state.dispatch(Mutation::Add(saved));
                        self.error = None;
                        Ok(())
                    }
                    Err(e) => {
                        self.error = Some(e.to_string());
                        Err(e)
                    }
                }
            }
            WritePolicy::ApplyImmediately => {
                let mut record = record;
                record.id = utils::local_record_id();
                self.state.dispatch(Mutation::Add(record));
                self.cache.save(&self.state.records);
                self.error = None;
                Ok(())
            }
        }
    }

    /// Edits an existing record, recapturing date and time. Only available
    /// with an identity; edits are not meaningful before one exists, so
    /// local-fallback mode rejects them without touching the store.
    pub fn update_expense(&mut self, id: &str, draft: ExpenseDraft) -> Result<(), LedgerError> {
        match self.policy {
            WritePolicy::ConfirmThenApply => {
                let patch = draft.into_patch();
                let outcome = self
                    .identity
                    .as_ref()
                    .ok_or(LedgerError::Unauthenticated)
                    .and_then(|identity| {
                        self.gateway
                            .update(&identity.owner_id, &identity.credential, id, &patch)
                    });
                match outcome {
                    Ok(()) => {
                        self.state.dispatch(Mutation::Update {
                            id: id.to_string(),
                            patch,
                        });
                        self.error = None;
                        Ok(())
                    }
                    Err(e) => {
                        self.error = Some(e.to_string());
                        Err(e)
                    }
                }
            }
            WritePolicy::ApplyImmediately => {
                let e = LedgerError::Unauthenticated;
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Deletes by id. The remote call is attempted when an identity is
    /// present, but the local removal and the cache re-persist happen
    /// regardless of its outcome, so local and remote state can diverge on
    /// a failed remote delete. Deleting an absent id is a no-op.
    pub fn delete_expense(&mut self, id: &str) {
        if let Some(identity) = &self.identity {
            if let Err(e) = self
                .gateway
                .remove(&identity.owner_id, &identity.credential, id)
            {
                tracing::warn!(id = %id, error = %e, "remote delete failed, removing locally anyway");
            }
        }
        self.state.dispatch(Mutation::Remove(id.to_string()));
        self.cache.save(&self.state.records);
    }

    /// Discards the session's working set.
    pub fn sign_out(&mut self) {
        self.state.dispatch(Mutation::Clear);
        self.identity = None;
        self.error = None;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn view(&self) -> LedgerView<'_> {
        LedgerView {
            records: &self.state.records,
            total_amount: self.state.total_amount,
            is_loading: self.phase == Phase::Loading,
            error: self.error.as_deref(),
        }
    }

    pub fn ledger(&self) -> &LedgerState {
        &self.state
    }
}
