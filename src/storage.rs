// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Durable mirror of the ledger: two JSON documents under fixed keys.
//!
//! Loading never fails; a missing or unreadable document is replaced by its
//! default. Saving is explicit and the caller decides what to do on error.

use std::collections::HashMap;

use anyhow::{Context, Result, anyhow};
use serde_json::{Map, Value};

use crate::ledger::Ledger;
use crate::models::{Source, Transaction, default_sources};

pub const SOURCES_KEY: &str = "sources";
pub const TRANSACTIONS_KEY: &str = "transactions";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn put(&mut self, key: &str, value: &str) -> Result<()>;
}

/// HashMap-backed store. Writes can be made to fail to exercise the
/// persistence error path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(anyhow!("storage unavailable: write to '{}' refused", key));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Sources are stored as an object keyed by id, in ledger order.
pub fn encode_sources(sources: &[Source]) -> Result<String> {
    let mut map = Map::new();
    for s in sources {
        map.insert(s.id.clone(), serde_json::to_value(s)?);
    }
    Ok(serde_json::to_string(&Value::Object(map))?)
}

pub fn decode_sources(raw: &str) -> Result<Vec<Source>> {
    let map: Map<String, Value> = serde_json::from_str(raw).context("sources is not a JSON object")?;
    let mut out = Vec::with_capacity(map.len());
    for (key, value) in map {
        let mut source: Source = serde_json::from_value(value)
            .with_context(|| format!("Invalid source record '{}'", key))?;
        if source.id != key {
            if !source.id.is_empty() {
                tracing::warn!(key = %key, id = %source.id, "source id differs from its key; using key");
            }
            source.id = key;
        }
        out.push(source);
    }
    Ok(out)
}

pub fn encode_transactions(transactions: &[Transaction]) -> Result<String> {
    Ok(serde_json::to_string(transactions)?)
}

/// Unreadable entries are skipped with a warning; the rest of the log loads.
pub fn decode_transactions(raw: &str) -> Result<Vec<Transaction>> {
    let items: Vec<Value> =
        serde_json::from_str(raw).context("transactions is not a valid JSON array")?;
    let mut out = Vec::with_capacity(items.len());
    for (pos, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<Transaction>(item) {
            Ok(t) => out.push(t),
            Err(err) => tracing::warn!(pos, error = %err, "skipping unreadable transaction"),
        }
    }
    Ok(out)
}

pub struct Repository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Repository<S> {
    pub fn new(store: S) -> Self {
        Repository { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn load(&self) -> Ledger {
        let sources = self
            .read(SOURCES_KEY, decode_sources)
            .unwrap_or_else(default_sources);
        let transactions = self
            .read(TRANSACTIONS_KEY, decode_transactions)
            .unwrap_or_default();
        Ledger::new(sources, transactions)
    }

    fn read<T>(&self, key: &str, decode: fn(&str) -> Result<T>) -> Option<T> {
        match self.store.get(key) {
            Ok(Some(raw)) => match decode(&raw) {
                Ok(v) => Some(v),
                Err(err) => {
                    tracing::warn!(key, error = %format!("{:#}", err), "stored record is corrupt; using default");
                    None
                }
            },
            Ok(None) => {
                tracing::debug!(key, "no stored record; using default");
                None
            }
            Err(err) => {
                tracing::warn!(key, error = %format!("{:#}", err), "failed to read stored record; using default");
                None
            }
        }
    }

    /// Writes both collections. Each key is written independently, so a
    /// failure on the second leaves the first already updated.
    pub fn save(&mut self, ledger: &Ledger) -> Result<()> {
        let sources = encode_sources(ledger.sources())?;
        let transactions = encode_transactions(ledger.transactions())?;
        self.store
            .put(SOURCES_KEY, &sources)
            .context("Failed to persist sources")?;
        self.store
            .put(TRANSACTIONS_KEY, &transactions)
            .context("Failed to persist transactions")?;
        Ok(())
    }

    /// Saves and logs any failure. The in-memory ledger stays authoritative
    /// either way. Returns whether the write succeeded.
    pub fn save_or_log(&mut self, ledger: &Ledger) -> bool {
        match self.save(ledger) {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(error = %format!("{:#}", err), "persisting ledger failed; changes kept in memory only");
                false
            }
        }
    }
}
