// Copyright (c) 2025 Spendlog Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rust_decimal::Decimal;
use spendlog::cache::FallbackCache;
use spendlog::controller::{Identity, LedgerController, WritePolicy};
use spendlog::error::LedgerError;
use spendlog::gateway::RemoteLedger;
use spendlog::models::{Category, ExpenseDraft, ExpensePatch, ExpenseRecord};
use tempfile::{tempdir, TempDir};

/// In-memory stand-in for the remote store, scriptable per operation.
#[derive(Default)]
struct Script {
    fail_create: Cell<bool>,
    fail_update: Cell<bool>,
    fail_remove: Cell<bool>,
    remote: RefCell<Vec<ExpenseRecord>>,
    created: Cell<u32>,
}

#[derive(Default, Clone)]
struct ScriptedGateway(Rc<Script>);

impl RemoteLedger for ScriptedGateway {
    fn create(
        &self,
        owner_id: &str,
        credential: &str,
        record: &ExpenseRecord,
    ) -> Result<ExpenseRecord, LedgerError> {
        if owner_id.is_empty() || credential.is_empty() {
            return Err(LedgerError::Unauthenticated);
        }
        if self.0.fail_create.get() {
            return Err(LedgerError::RemoteWriteFailed("store said no".to_string()));
        }
        let n = self.0.created.get() + 1;
        self.0.created.set(n);
        let mut saved = record.clone();
        saved.id = format!("srv-{}", n);
        self.0.remote.borrow_mut().insert(0, saved.clone());
        Ok(saved)
    }

    fn fetch_all(&self, _owner_id: &str, _credential: &str) -> Vec<ExpenseRecord> {
        self.0.remote.borrow().clone()
    }

    fn update(
        &self,
        _owner_id: &str,
        _credential: &str,
        _id: &str,
        _patch: &ExpensePatch,
    ) -> Result<(), LedgerError> {
        if self.0.fail_update.get() {
            return Err(LedgerError::RemoteWriteFailed("store said no".to_string()));
        }
        Ok(())
    }

    fn remove(&self, _owner_id: &str, _credential: &str, _id: &str) -> Result<(), LedgerError> {
        if self.0.fail_remove.get() {
            return Err(LedgerError::RemoteWriteFailed("store said no".to_string()));
        }
        Ok(())
    }
}

fn identity() -> Identity {
    Identity {
        owner_id: "user-1".to_string(),
        credential: "token-1".to_string(),
    }
}

fn remote_controller(
    script: Rc<Script>,
) -> (LedgerController<ScriptedGateway>, FallbackCache, TempDir) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("expenses.json");
    let ctl = LedgerController::new(
        ScriptedGateway(script),
        FallbackCache::at(path.clone()),
        Some(identity()),
    );
    (ctl, FallbackCache::at(path), dir)
}

fn local_controller() -> (LedgerController<ScriptedGateway>, FallbackCache, TempDir) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("expenses.json");
    let ctl = LedgerController::new(
        ScriptedGateway::default(),
        FallbackCache::at(path.clone()),
        None,
    );
    (ctl, FallbackCache::at(path), dir)
}

fn draft(amount: &str, description: &str, category: Category) -> ExpenseDraft {
    ExpenseDraft::new(amount.parse().unwrap(), description, category).unwrap()
}

fn seeded(id: &str, amount: &str) -> ExpenseRecord {
    ExpenseRecord {
        id: id.to_string(),
        amount: amount.parse().unwrap(),
        description: "seeded".to_string(),
        category: Category::Food,
        date: "01/15/2025".to_string(),
        time: "12:00:00".to_string(),
        timestamp: 1,
    }
}

#[test]
fn policy_follows_identity_presence() {
    let (remote, _, _d1) = remote_controller(Rc::default());
    let (local, _, _d2) = local_controller();
    assert_eq!(remote.policy(), WritePolicy::ConfirmThenApply);
    assert_eq!(local.policy(), WritePolicy::ApplyImmediately);
}

#[test]
fn remote_create_failure_leaves_state_unchanged() {
    let script = Rc::new(Script::default());
    script.fail_create.set(true);
    let (mut ctl, _, _dir) = remote_controller(script);
    ctl.load();

    let result = ctl.add_expense(draft("100", "Lunch", Category::Food));
    assert!(matches!(result, Err(LedgerError::RemoteWriteFailed(_))));

    let view = ctl.view();
    assert!(view.records.is_empty());
    assert_eq!(view.total_amount, Decimal::ZERO);
    assert_eq!(view.error, Some("remote write failed: store said no"));
}

#[test]
fn remote_create_applies_server_confirmed_record() {
    let (mut ctl, _, _dir) = remote_controller(Rc::default());
    ctl.load();
    ctl.add_expense(draft("100", "Lunch", Category::Food)).unwrap();

    let view = ctl.view();
    assert_eq!(view.records.len(), 1);
    assert_eq!(view.records[0].id, "srv-1");
    assert_eq!(view.total_amount, Decimal::from(100));
    assert_eq!(view.error, None);
}

#[test]
fn error_clears_on_next_successful_operation() {
    let script = Rc::new(Script::default());
    script.fail_create.set(true);
    let (mut ctl, _, _dir) = remote_controller(Rc::clone(&script));
    ctl.load();

    assert!(ctl.add_expense(draft("5", "Tea", Category::Food)).is_err());
    assert!(ctl.view().error.is_some());

    script.fail_create.set(false);
    ctl.add_expense(draft("5", "Tea", Category::Food)).unwrap();
    assert_eq!(ctl.view().error, None);
}

#[test]
fn local_fallback_add_persists_snapshot() {
    let (mut ctl, cache, _dir) = local_controller();
    ctl.load();
    ctl.add_expense(draft("50", "Tea", Category::Food)).unwrap();

    let view = ctl.view();
    assert_eq!(view.records.len(), 1);
    assert!(!view.records[0].id.is_empty());
    assert_eq!(view.total_amount, Decimal::from(50));

    let snapshot = cache.load();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, view.records[0].id);
    assert_eq!(snapshot[0].amount, view.records[0].amount);
    assert_eq!(snapshot[0].description, "Tea");
}

#[test]
fn load_prefers_remote_when_identity_present() {
    let script = Rc::new(Script::default());
    script.remote.borrow_mut().push(seeded("-Nx1", "30"));
    let (mut ctl, cache, _dir) = remote_controller(script);
    // A stale local snapshot must not leak into the remote working set.
    cache.save(&[seeded("stale", "999")]);

    ctl.load();
    let view = ctl.view();
    assert_eq!(view.records.len(), 1);
    assert_eq!(view.records[0].id, "-Nx1");
    assert_eq!(view.total_amount, Decimal::from(30));
}

#[test]
fn load_falls_back_to_cache_without_identity() {
    let (mut ctl, cache, _dir) = local_controller();
    cache.save(&[seeded("loc-1", "12.50")]);

    ctl.load();
    let view = ctl.view();
    assert_eq!(view.records.len(), 1);
    assert_eq!(view.records[0].id, "loc-1");
    assert_eq!(view.total_amount, "12.50".parse::<Decimal>().unwrap());
    assert!(!view.is_loading);
}

#[test]
fn delete_under_remote_failure_still_mutates_locally() {
    let script = Rc::new(Script::default());
    script.remote.borrow_mut().push(seeded("-Nx1", "30"));
    script.fail_remove.set(true);
    let (mut ctl, cache, _dir) = remote_controller(script);
    ctl.load();
    assert_eq!(ctl.view().total_amount, Decimal::from(30));

    ctl.delete_expense("-Nx1");
    let view = ctl.view();
    assert!(view.records.is_empty());
    assert_eq!(view.total_amount, Decimal::ZERO);
    assert!(cache.load().is_empty());
}

#[test]
fn delete_of_absent_id_is_noop() {
    let (mut ctl, _, _dir) = local_controller();
    ctl.load();
    ctl.add_expense(draft("50", "Tea", Category::Food)).unwrap();
    ctl.delete_expense("no-such-id");
    assert_eq!(ctl.view().records.len(), 1);
    assert_eq!(ctl.view().total_amount, Decimal::from(50));
}

#[test]
fn remote_update_applies_on_success_and_recaptures_stamp() {
    let script = Rc::new(Script::default());
    script.remote.borrow_mut().push(seeded("-Nx1", "30"));
    let (mut ctl, _, _dir) = remote_controller(script);
    ctl.load();

    ctl.update_expense("-Nx1", draft("45", "Dinner", Category::Entertainment))
        .unwrap();
    let view = ctl.view();
    assert_eq!(view.records[0].amount, Decimal::from(45));
    assert_eq!(view.records[0].description, "Dinner");
    assert_eq!(view.records[0].category, Category::Entertainment);
    assert!(view.records[0].timestamp > 1);
    assert_eq!(view.total_amount, Decimal::from(45));
}

#[test]
fn remote_update_failure_sets_error_and_leaves_record() {
    let script = Rc::new(Script::default());
    script.remote.borrow_mut().push(seeded("-Nx1", "30"));
    script.fail_update.set(true);
    let (mut ctl, _, _dir) = remote_controller(script);
    ctl.load();

    let result = ctl.update_expense("-Nx1", draft("45", "Dinner", Category::Food));
    assert!(matches!(result, Err(LedgerError::RemoteWriteFailed(_))));
    let view = ctl.view();
    assert_eq!(view.records[0].amount, Decimal::from(30));
    assert_eq!(view.records[0].description, "seeded");
    assert!(view.error.is_some());
}

#[test]
fn update_rejected_in_local_fallback_mode() {
    let (mut ctl, _, _dir) = local_controller();
    ctl.load();
    ctl.add_expense(draft("50", "Tea", Category::Food)).unwrap();
    let id = ctl.view().records[0].id.clone();

    let result = ctl.update_expense(&id, draft("60", "Coffee", Category::Food));
    assert!(matches!(result, Err(LedgerError::Unauthenticated)));
    assert_eq!(ctl.view().records[0].description, "Tea");
    assert_eq!(ctl.view().total_amount, Decimal::from(50));
    assert!(ctl.view().error.is_some());
}

#[test]
fn validation_rejects_before_any_dispatch() {
    assert!(matches!(
        ExpenseDraft::new(Decimal::ZERO, "Lunch", Category::Food),
        Err(LedgerError::Validation(_))
    ));
    assert!(matches!(
        ExpenseDraft::new(Decimal::from(10), "   ", Category::Food),
        Err(LedgerError::Validation(_))
    ));
}

#[test]
fn sign_out_discards_working_set() {
    let script = Rc::new(Script::default());
    script.remote.borrow_mut().push(seeded("-Nx1", "30"));
    let (mut ctl, _, _dir) = remote_controller(script);
    ctl.load();
    assert_eq!(ctl.view().records.len(), 1);

    ctl.sign_out();
    assert!(ctl.view().records.is_empty());
    assert_eq!(ctl.view().total_amount, Decimal::ZERO);
    assert_eq!(ctl.view().error, None);
}

#[test]
fn dismiss_error_clears_transient_failure() {
    let script = Rc::new(Script::default());
    script.fail_create.set(true);
    let (mut ctl, _, _dir) = remote_controller(script);
    ctl.load();
    assert!(ctl.add_expense(draft("5", "Tea", Category::Food)).is_err());
    assert!(ctl.view().error.is_some());
    ctl.dismiss_error();
    assert_eq!(ctl.view().error, None);
}
