// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A named pool of funds (cash, a bank account, a wallet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    // Older records may omit the id; the storage key fills it in.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub balance: Decimal,
    #[serde(default)]
    pub color: String,
    #[serde(
        rename = "iconName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub icon_name: Option<String>,
}

impl Source {
    pub fn new(id: &str, name: &str, balance: Decimal, color: &str) -> Self {
        Source {
            id: id.to_string(),
            name: name.to_string(),
            balance,
            color: color.to_string(),
            icon_name: None,
        }
    }
}

/// The three zero-balance sources a fresh ledger starts with.
pub fn default_sources() -> Vec<Source> {
    vec![
        Source::new("cash", "Cash", Decimal::ZERO, "#0088FE"),
        Source::new("bankAccounts", "Bank Accounts", Decimal::ZERO, "#00C49F"),
        Source::new("digitalWallets", "Digital Wallets", Decimal::ZERO, "#FFBB28"),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnType {
    Income,
    Expense,
}

impl TxnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxnType::Income => "income",
            TxnType::Expense => "expense",
        }
    }

    /// Applies the sign convention: income is positive, expense negative.
    pub fn signed(&self, magnitude: Decimal) -> Decimal {
        match self {
            TxnType::Income => magnitude,
            TxnType::Expense => -magnitude,
        }
    }
}

impl std::str::FromStr for TxnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TxnType::Income),
            "expense" => Ok(TxnType::Expense),
            other => Err(format!("Unknown transaction type '{}' (use income|expense)", other)),
        }
    }
}

/// A single recorded money movement. The sign of `amount` is authoritative;
/// `kind` is informational and may be missing from older records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredTransaction")]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TxnType>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub date: DateTime<Utc>,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn kind(&self) -> TxnType {
        match self.kind {
            Some(k) => k,
            None if self.amount.is_sign_negative() => TxnType::Expense,
            None => TxnType::Income,
        }
    }
}

// Older records carry only one of `date` and `timestamp`.
#[derive(Deserialize)]
struct StoredTransaction {
    id: i64,
    #[serde(rename = "type", default)]
    kind: Option<TxnType>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    amount: Decimal,
    source: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    date: Option<DateTime<Utc>>,
    #[serde(default)]
    timestamp: Option<DateTime<Utc>>,
}

impl TryFrom<StoredTransaction> for Transaction {
    type Error = String;

    fn try_from(raw: StoredTransaction) -> Result<Self, Self::Error> {
        let (date, timestamp) = match (raw.date, raw.timestamp) {
            (Some(d), Some(t)) => (d, t),
            (Some(d), None) => (d, d),
            (None, Some(t)) => (t, t),
            (None, None) => {
                return Err(format!("transaction {} has neither date nor timestamp", raw.id));
            }
        };
        Ok(Transaction {
            id: raw.id,
            kind: raw.kind,
            amount: raw.amount,
            source: raw.source,
            description: raw.description,
            date,
            timestamp,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub kind: TxnType,
    /// Positive magnitude; the ledger applies the sign from `kind`.
    pub amount: Decimal,
    pub source: String,
    pub description: Option<String>,
    /// Effective date. Defaults to the time of recording.
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct NewSource {
    pub name: String,
    pub initial_balance: Decimal,
    pub icon_name: Option<String>,
}

/// Field overwrites for an existing source. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct SourcePatch {
    pub name: Option<String>,
    pub balance: Option<Decimal>,
    pub color: Option<String>,
    pub icon_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSlice {
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub value: Decimal,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SourceMetrics {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_income: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub total_expense: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub net_flow: Decimal,
    pub total_transactions: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthBucket<'a> {
    pub label: String,
    pub transactions: Vec<&'a Transaction>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrend {
    pub month: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub income: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub expense: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceComparison {
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub income: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub expense: Decimal,
}
