//! finlog-store: persistence of the transaction ledger

pub mod csv_store;
pub mod error;

pub use csv_store::{CsvStore, HEADER};
pub use error::StoreError;

use finlog_core::Transaction;

/// Whole-collection persistence of an ordered transaction sequence.
pub trait TransactionStore {
    /// Every stored transaction in stored order. Creates an empty store if
    /// none exists yet.
    fn load(&self) -> Result<Vec<Transaction>, StoreError>;

    /// Add one transaction after the existing ones without rewriting them.
    fn append(&self, t: &Transaction) -> Result<(), StoreError>;

    /// Replace the stored sequence with `txns`.
    fn save_all(&self, txns: &[Transaction]) -> Result<(), StoreError>;
}
