// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The in-memory ledger: sources, the transaction log, and the rules that
//! keep balances and references consistent. Persistence lives in
//! [`crate::storage`]; nothing here performs I/O.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::error::LedgerError;
use crate::models::{NewSource, NewTransaction, Source, SourcePatch, Transaction, default_sources};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub struct Ledger {
    sources: Vec<Source>,
    // Newest first.
    transactions: Vec<Transaction>,
    // Ids deleted during this session; never handed out again.
    retired: HashSet<String>,
    clock: Box<dyn Clock>,
    rng: StdRng,
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("sources", &self.sources)
            .field("transactions", &self.transactions)
            .finish_non_exhaustive()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger::new(default_sources(), Vec::new())
    }
}

impl Ledger {
    pub fn new(sources: Vec<Source>, transactions: Vec<Transaction>) -> Self {
        Ledger {
            sources,
            transactions,
            retired: HashSet::new(),
            clock: Box::new(SystemClock),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Reseeds the color generator so source colors are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    pub fn source(&self, id: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.id == id)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Records a movement against an existing source and applies its signed
    /// amount to that source's balance.
    pub fn record_transaction(&mut self, input: NewTransaction) -> Result<&Transaction, LedgerError> {
        if input.amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(input.amount.to_string()));
        }
        let idx = self
            .position(&input.source)
            .ok_or_else(|| LedgerError::SourceNotFound(input.source.clone()))?;

        let amount = input.kind.signed(input.amount);
        let balance = self.sources[idx]
            .balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::BalanceOverflow(input.source.clone()))?;

        let now = self.clock.now();
        let txn = Transaction {
            id: self.next_transaction_id(now),
            kind: Some(input.kind),
            amount,
            source: input.source,
            description: input
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            date: input.date.unwrap_or(now),
            timestamp: now,
        };
        tracing::debug!(id = txn.id, source = %txn.source, %amount, "recording transaction");

        self.sources[idx].balance = balance;
        self.transactions.insert(0, txn);
        Ok(&self.transactions[0])
    }

    pub fn add_source(&mut self, input: NewSource) -> Result<&Source, LedgerError> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(LedgerError::EmptyName);
        }
        let id = self.next_source_id(self.clock.now());
        let color = format!("#{:06X}", self.rng.gen_range(0..=0xFF_FFFFu32));
        tracing::debug!(%id, %color, "adding source");

        self.sources.push(Source {
            id,
            name: name.to_string(),
            balance: input.initial_balance,
            color,
            icon_name: input.icon_name,
        });
        Ok(&self.sources[self.sources.len() - 1])
    }

    /// Overwrites the given fields of an existing source. Unknown ids are
    /// rejected rather than inserted.
    pub fn update_source(&mut self, id: &str, patch: SourcePatch) -> Result<&Source, LedgerError> {
        let idx = self
            .position(id)
            .ok_or_else(|| LedgerError::SourceNotFound(id.to_string()))?;
        let name = match patch.name {
            Some(n) if n.trim().is_empty() => return Err(LedgerError::EmptyName),
            Some(n) => Some(n.trim().to_string()),
            None => None,
        };

        let source = &mut self.sources[idx];
        if let Some(n) = name {
            source.name = n;
        }
        if let Some(b) = patch.balance {
            source.balance = b;
        }
        if let Some(c) = patch.color {
            source.color = c;
        }
        if let Some(i) = patch.icon_name {
            source.icon_name = Some(i);
        }
        Ok(&self.sources[idx])
    }

    pub fn delete_source(&mut self, id: &str) -> Result<Source, LedgerError> {
        let count = self.transactions.iter().filter(|t| t.source == id).count();
        if count > 0 {
            return Err(LedgerError::SourceInUse {
                id: id.to_string(),
                count,
            });
        }
        let idx = self
            .position(id)
            .ok_or_else(|| LedgerError::SourceNotFound(id.to_string()))?;
        let removed = self.sources.remove(idx);
        self.retired.insert(removed.id.clone());
        Ok(removed)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.sources.iter().position(|s| s.id == id)
    }

    fn next_transaction_id(&self, now: DateTime<Utc>) -> i64 {
        let millis = now.timestamp_millis();
        match self.transactions.iter().map(|t| t.id).max() {
            Some(last) if last >= millis => last + 1,
            _ => millis,
        }
    }

    fn next_source_id(&self, now: DateTime<Utc>) -> String {
        let base = format!("source-{}", now.timestamp_millis());
        let taken = |candidate: &str| {
            self.retired.contains(candidate) || self.sources.iter().any(|s| s.id == candidate)
        };
        if !taken(&base) {
            return base;
        }
        let mut n = 1u32;
        loop {
            let candidate = format!("{}-{}", base, n);
            if !taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}
