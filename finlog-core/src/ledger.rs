//! In-memory ledger: loaded transactions addressed by a stable id.
//!
//! Ids are handed out in load order starting at 1, so they match the
//! numbering a user sees in a listing. Removing an entry never renumbers the
//! others.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RangeError;
use crate::transaction::Transaction;

/// Handle to one ledger entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct TxnId(u32);

impl TxnId {
    pub fn new(n: u32) -> Self {
        Self(n)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TxnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    entries: Vec<(TxnId, Transaction)>,
    next_id: u32,
}

impl Ledger {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    pub fn from_transactions(txns: Vec<Transaction>) -> Self {
        let mut ledger = Self::new();
        for t in txns {
            ledger.push(t);
        }
        ledger
    }

    /// Append and return the new entry's id
    pub fn push(&mut self, t: Transaction) -> TxnId {
        // Default-constructed ledgers start at 0; ids are 1-based
        let id = TxnId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        self.entries.push((id, t));
        id
    }

    pub fn get(&self, id: TxnId) -> Option<&Transaction> {
        self.entries.iter().find(|(i, _)| *i == id).map(|(_, t)| t)
    }

    pub fn remove(&mut self, id: TxnId) -> Result<Transaction, RangeError> {
        let pos = self
            .entries
            .iter()
            .position(|(i, _)| *i == id)
            .ok_or(RangeError::NoSuchTransaction { id, len: self.entries.len() })?;
        Ok(self.entries.remove(pos).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TxnId, &Transaction)> {
        self.entries.iter().map(|(id, t)| (*id, t))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remaining transactions in order, as written back to storage
    pub fn transactions(&self) -> Vec<Transaction> {
        self.entries.iter().map(|(_, t)| t.clone()).collect()
    }
}
