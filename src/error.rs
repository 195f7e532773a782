// Copyright (c) 2025 Spendlog Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failure taxonomy for ledger operations.
///
/// `RemoteReadFailed` and `Serialization` never reach the UI: the gateway
/// and the fallback cache log and absorb them so a flaky network or a
/// corrupt snapshot degrades to an empty ledger instead of blocking the
/// caller.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid expense: {0}")]
    Validation(String),

    #[error("not signed in: owner identity or credential missing")]
    Unauthenticated,

    #[error("remote write failed: {0}")]
    RemoteWriteFailed(String),

    #[error("remote read failed: {0}")]
    RemoteReadFailed(String),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
