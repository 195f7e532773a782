// Copyright (c) 2025 Spendlog Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use comfy_table::{presets::UTF8_FULL, Cell, Table};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

const UA: &str = concat!(
    "spendlog/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/spendlog/spendlog)"
);

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{}", d.round_dp(2))
}

/// Best-effort numeric coercion for amounts coming off the schemaless
/// remote store: JSON numbers and parseable strings become decimals,
/// everything else contributes zero.
pub fn coerce_amount(v: &Value) -> Decimal {
    match v {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Decimal::from(i)
            } else if let Some(u) = n.as_u64() {
                Decimal::from(u)
            } else {
                n.as_f64()
                    .and_then(Decimal::from_f64_retain)
                    .unwrap_or_default()
            }
        }
        Value::String(s) => s.trim().parse::<Decimal>().unwrap_or_default(),
        _ => Decimal::ZERO,
    }
}

pub fn de_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(coerce_amount(&v))
}

/// Identifier generator for local-fallback mode: the millisecond clock as a
/// string. Remote mode never calls this; the store assigns ids there.
pub fn local_record_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// Captures the locale-formatted date and time plus the millisecond instant
/// stamped onto a record at creation or edit.
pub fn now_stamp() -> (String, String, i64) {
    let now = Local::now();
    (
        now.format("%m/%d/%Y").to_string(),
        now.format("%H:%M:%S").to_string(),
        now.timestamp_millis(),
    )
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
