//! Typed failures raised by validation and by period/ledger bounds checks.

use chrono::NaiveDate;
use thiserror::Error;

use crate::ledger::TxnId;

/// A raw user-supplied value could not be turned into a domain value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("invalid date '{0}': use YYYY-MM-DD (for example 2025-01-02)")]
    InvalidDate(String),
    #[error("amount '{0}' is not a number (for example 1200 or 12.50)")]
    InvalidAmount(String),
    #[error("amount must be greater than 0, got {0}")]
    NonPositiveAmount(String),
    #[error("unknown type '{0}': expected expense/income (or расход/доход)")]
    UnknownType(String),
}

/// A caller asked for something outside the valid range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("period end {end} is before start {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    #[error("no transaction #{id} (ledger holds {len})")]
    NoSuchTransaction { id: TxnId, len: usize },
}
