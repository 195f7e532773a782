// Copyright (c) 2025 Spendlog Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{bail, Result};
use serde_json::json;

use crate::controller::LedgerController;
use crate::gateway::RemoteLedger;
use crate::store::LedgerState;
use crate::utils::fmt_money;

pub fn handle<G: RemoteLedger>(ctl: &LedgerController<G>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("ledger", sub)) => {
            let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
            let out = sub.get_one::<String>("out").unwrap();
            export_ledger(ctl.ledger(), &fmt, out)
        }
        _ => Ok(()),
    }
}

pub fn export_ledger(ledger: &LedgerState, fmt: &str, out: &str) -> Result<()> {
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "time", "description", "category", "amount"])?;
            for r in &ledger.records {
                wtr.write_record([
                    r.date.as_str(),
                    r.time.as_str(),
                    r.description.as_str(),
                    r.category.as_str(),
                    &fmt_money(&r.amount),
                ])?;
            }
            // Trailing total row, matching the summary the UI shows.
            wtr.write_record(["", "", "TOTAL", "", &fmt_money(&ledger.total_amount)])?;
            wtr.flush()?;
        }
        "json" => {
            let doc = json!({
                "exportDate": chrono::Utc::now().to_rfc3339(),
                "totalExpenses": ledger.records.len(),
                "totalAmount": ledger.total_amount,
                "expenses": ledger.records,
            });
            std::fs::write(out, serde_json::to_string_pretty(&doc)?)?;
        }
        _ => {
            bail!("Unknown format: {} (use csv|json)", fmt);
        }
    }
    println!("Exported ledger to {}", out);
    Ok(())
}
