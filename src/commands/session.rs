// Copyright (c) 2025 Spendlog Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::session::{self, Session};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("login", sub)) => login(sub)?,
        Some(("logout", _)) => logout()?,
        Some(("status", _)) => status(),
        _ => {}
    }
    Ok(())
}

fn login(sub: &clap::ArgMatches) -> Result<()> {
    let session = Session {
        user_id: sub.get_one::<String>("user-id").unwrap().clone(),
        id_token: sub.get_one::<String>("token").unwrap().clone(),
        database_url: sub.get_one::<String>("database-url").unwrap().clone(),
    };
    session::save(&session)?;
    println!("Signed in as {}", session.user_id);
    Ok(())
}

fn logout() -> Result<()> {
    session::clear()?;
    println!("Signed out; ledger operations now run in local-fallback mode");
    Ok(())
}

fn status() {
    match session::load() {
        Some(s) => println!("Signed in as {} ({})", s.user_id, s.database_url),
        None => println!("Not signed in (local-fallback mode)"),
    }
}
