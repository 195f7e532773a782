// Copyright (c) 2025 Spendlog Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use spendlog::cache::FallbackCache;
use spendlog::controller::{Identity, LedgerController};
use spendlog::gateway::FirebaseGateway;
use spendlog::{cli, commands, session};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    match matches.subcommand() {
        Some(("auth", sub)) => commands::session::handle(sub)?,
        Some(("expense", sub)) => {
            let mut ctl = build_controller()?;
            ctl.load();
            commands::expenses::handle(&mut ctl, sub)?;
        }
        Some(("export", sub)) => {
            let mut ctl = build_controller()?;
            ctl.load();
            commands::exporter::handle(&ctl, sub)?;
        }
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

fn build_controller() -> Result<LedgerController<FirebaseGateway>> {
    let (identity, database_url) = match session::load() {
        Some(s) => (
            Some(Identity {
                owner_id: s.user_id,
                credential: s.id_token,
            }),
            s.database_url,
        ),
        None => (None, String::new()),
    };
    let gateway = FirebaseGateway::new(&database_url)?;
    let cache = FallbackCache::open_default()?;
    Ok(LedgerController::new(gateway, cache, identity))
}
