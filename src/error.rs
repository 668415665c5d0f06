// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Rejections raised by the ledger before any state is touched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// Amount was non-numeric, zero or negative.
    #[error("Invalid amount '{0}': expected a number greater than zero")]
    InvalidAmount(String),

    #[error("Source name must not be empty")]
    EmptyName,

    #[error("Source '{0}' not found")]
    SourceNotFound(String),

    #[error("Balance of source '{0}' would overflow")]
    BalanceOverflow(String),

    /// A source cannot be removed while transactions still point at it.
    #[error("Cannot delete source '{id}' with existing transactions ({count})")]
    SourceInUse { id: String, count: usize },
}
