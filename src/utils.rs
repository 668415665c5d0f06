// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::LedgerError;

pub fn parse_date(s: &str) -> Result<DateTime<Utc>> {
    let d = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))?;
    let midnight = d
        .and_hms_opt(0, 0, 0)
        .with_context(|| format!("Invalid date '{}'", s))?;
    Ok(Utc.from_utc_datetime(&midnight))
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

/// Parses a transaction amount. Only finite numbers greater than zero pass.
pub fn parse_amount(s: &str) -> Result<Decimal, LedgerError> {
    match s.trim().parse::<Decimal>() {
        Ok(d) if d > Decimal::ZERO => Ok(d),
        _ => Err(LedgerError::InvalidAmount(s.trim().to_string())),
    }
}

/// Lenient parse for opening balances: anything unparseable counts as zero.
pub fn parse_balance(s: &str) -> Decimal {
    s.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

/// Rupee amount with Indian digit grouping and no fraction, e.g. `₹1,23,456`.
/// The sign is dropped; callers show direction separately.
pub fn format_inr(d: Decimal) -> String {
    let whole = d
        .abs()
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .trunc()
        .to_string();
    let (head, tail) = if whole.len() > 3 {
        whole.split_at(whole.len() - 3)
    } else {
        ("", whole.as_str())
    };
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (l, r) = rest.split_at(rest.len() - 2);
        groups.push(r);
        rest = l;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();
    groups.push(tail);
    format!("₹{}", groups.join(","))
}

pub fn format_signed_inr(d: Decimal) -> String {
    if d.is_sign_negative() && !d.is_zero() {
        format!("- {}", format_inr(d))
    } else {
        format!("+ {}", format_inr(d))
    }
}

/// `16 Oct 2026`
pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%-d %b %Y").to_string()
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
