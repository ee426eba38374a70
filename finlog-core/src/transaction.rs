//! Transaction record type

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Kind {
    #[serde(rename = "expense")]
    Expense,
    #[serde(rename = "income")]
    Income,
}

impl Kind {
    /// Canonical token written to storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Expense => "expense",
            Kind::Income => "income",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses only the canonical tokens. User input goes through
/// [`crate::validate::normalize_type`] instead.
impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" => Ok(Kind::Expense),
            "income" => Ok(Kind::Income),
            other => Err(format!("expected 'expense' or 'income', got '{other}'")),
        }
    }
}

/// One financial event. Fields are read-only once constructed; an edit is a
/// removal followed by a new record.
///
/// Construction does not re-validate: every value reaching `new` has already
/// passed through [`crate::validate`] or was read back from a file this crate
/// wrote.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    date: NaiveDate,
    #[serde(rename = "type")]
    kind: Kind,
    category: String,
    amount: f64,
    comment: String,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        kind: Kind,
        category: impl Into<String>,
        amount: f64,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            date,
            kind,
            category: category.into(),
            amount,
            comment: comment.into(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Always positive; direction comes from [`Kind`]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Empty when no comment was given
    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn is_expense(&self) -> bool {
        self.kind == Kind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == Kind::Income
    }

    /// Positive for income, negative for expense
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            Kind::Income => self.amount,
            Kind::Expense => -self.amount,
        }
    }
}
