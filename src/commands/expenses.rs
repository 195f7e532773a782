// Copyright (c) 2025 Spendlog Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::Serialize;

use crate::controller::LedgerController;
use crate::gateway::RemoteLedger;
use crate::models::{Category, ExpenseDraft};
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};

pub fn handle<G: RemoteLedger>(
    ctl: &mut LedgerController<G>,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ctl, sub)?,
        Some(("list", sub)) => list(ctl, sub)?,
        Some(("update", sub)) => update(ctl, sub)?,
        Some(("delete", sub)) => delete(ctl, sub)?,
        Some(("total", sub)) => total(ctl, sub)?,
        _ => {}
    }
    Ok(())
}

fn draft_from_args(sub: &clap::ArgMatches) -> Result<ExpenseDraft> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let description = sub.get_one::<String>("description").unwrap();
    let category: Category = sub.get_one::<String>("category").unwrap().parse()?;
    Ok(ExpenseDraft::new(amount, description, category)?)
}

fn add<G: RemoteLedger>(ctl: &mut LedgerController<G>, sub: &clap::ArgMatches) -> Result<()> {
    let draft = draft_from_args(sub)?;
    let (amount, description, category) = (draft.amount, draft.description.clone(), draft.category);
    ctl.add_expense(draft)?;
    println!("Recorded {} for '{}' ({})", amount, description, category);
    Ok(())
}

#[derive(Serialize)]
pub struct ExpenseRow {
    pub id: String,
    pub date: String,
    pub time: String,
    pub description: String,
    pub category: String,
    pub amount: String,
}

pub fn query_rows<G: RemoteLedger>(
    ctl: &LedgerController<G>,
    sub: &clap::ArgMatches,
) -> Result<Vec<ExpenseRow>> {
    let category = sub
        .get_one::<String>("category")
        .map(|s| s.parse::<Category>())
        .transpose()?;
    let mut rows: Vec<ExpenseRow> = ctl
        .view()
        .records
        .iter()
        .filter(|r| category.map_or(true, |c| r.category == c))
        .map(|r| ExpenseRow {
            id: r.id.clone(),
            date: r.date.clone(),
            time: r.time.clone(),
            description: r.description.clone(),
            category: r.category.to_string(),
            amount: fmt_money(&r.amount),
        })
        .collect();
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    Ok(rows)
}

fn list<G: RemoteLedger>(ctl: &LedgerController<G>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(ctl, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.time.clone(),
                    r.description.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Date", "Time", "Description", "Category", "Amount", "ID"],
                rows,
            )
        );
        println!("Total: {}", fmt_money(&ctl.view().total_amount));
    }
    Ok(())
}

fn update<G: RemoteLedger>(ctl: &mut LedgerController<G>, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let draft = draft_from_args(sub)?;
    ctl.update_expense(id, draft)?;
    println!("Updated expense {}", id);
    Ok(())
}

fn delete<G: RemoteLedger>(ctl: &mut LedgerController<G>, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    ctl.delete_expense(id);
    println!("Deleted expense {}", id);
    Ok(())
}

#[derive(Serialize)]
struct TotalReport {
    total_amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    by_category: Option<Vec<(String, String)>>,
}

fn total<G: RemoteLedger>(ctl: &LedgerController<G>, sub: &clap::ArgMatches) -> Result<()> {
    let by_category = sub.get_flag("by-category");
    let breakdown = by_category.then(|| {
        ctl.ledger()
            .category_totals()
            .into_iter()
            .map(|(cat, sum)| (cat.to_string(), fmt_money(&sum)))
            .collect::<Vec<_>>()
    });
    let report = TotalReport {
        total_amount: fmt_money(&ctl.view().total_amount),
        by_category: breakdown.clone(),
    };
    if !maybe_print_json(sub.get_flag("json"), false, &report)? {
        if let Some(breakdown) = breakdown {
            let rows = breakdown.into_iter().map(|(c, s)| vec![c, s]).collect();
            println!("{}", pretty_table(&["Category", "Amount"], rows));
        }
        println!("Total: {}", report.total_amount);
    }
    Ok(())
}
