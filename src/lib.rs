// Copyright (c) 2025 Spendlog Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cache;
pub mod cli;
pub mod commands;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod models;
pub mod session;
pub mod store;
pub mod utils;
