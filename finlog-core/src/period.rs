//! Inclusive date ranges and the presets offered to the user.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RangeError;
use crate::report::filter_by_period;
use crate::transaction::Transaction;

/// An inclusive `[start, end]` date range
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Period {
    start: NaiveDate,
    end: NaiveDate,
}

impl Period {
    /// Fails when `end` is before `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, RangeError> {
        if end < start {
            return Err(RangeError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    /// Just `today`
    pub fn day(today: NaiveDate) -> Self {
        Self { start: today, end: today }
    }

    /// The `n` days ending with `today`. `n == 0` is treated as 1.
    pub fn last_days(today: NaiveDate, n: u64) -> Self {
        let back = n.saturating_sub(1);
        let start = today.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    /// First day of the current month through `today`
    pub fn month_to_date(today: NaiveDate) -> Self {
        let start = today.with_day(1).unwrap_or(today);
        Self { start, end: today }
    }

    /// Every representable date
    pub fn all() -> Self {
        Self {
            start: NaiveDate::MIN,
            end: NaiveDate::MAX,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn filter<'a>(&self, txns: &'a [Transaction]) -> Vec<&'a Transaction> {
        filter_by_period(txns, self.start, self.end)
    }

    pub fn is_unbounded(&self) -> bool {
        self.start == NaiveDate::MIN && self.end == NaiveDate::MAX
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unbounded() {
            return f.write_str("all time");
        }
        write!(f, "{} — {}", self.start.format("%Y-%m-%d"), self.end.format("%Y-%m-%d"))
    }
}
