//! finlog-core: transaction model, input validation and reports for the finlog ledger

pub mod error;
pub mod ledger;
pub mod period;
pub mod report;
pub mod time;
pub mod transaction;
pub mod validate;

pub use error::{RangeError, ValidationError};
pub use ledger::{Ledger, TxnId};
pub use period::Period;
pub use report::{
    CategoryTotal, DEFAULT_TOP_N, Summary, filter_by_period, summary, top_expense_categories,
};
pub use transaction::{Kind, Transaction};
pub use validate::{
    DEFAULT_CATEGORY, normalize_category, normalize_comment, normalize_type, parse_amount,
    parse_date, parse_iso_date,
};
