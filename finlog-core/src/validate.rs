//! Turn raw user input into domain values.
//!
//! Every function here takes the string exactly as typed and either returns
//! the canonical value or a [`ValidationError`] whose message can be shown
//! to the user as-is.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

use crate::error::ValidationError;
use crate::transaction::Kind;

/// Category used when the user leaves the field blank
pub const DEFAULT_CATEGORY: &str = "other";

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("static date pattern"));

const EXPENSE_TOKENS: &[&str] = &["expense", "e", "расход", "р"];
const INCOME_TOKENS: &[&str] = &["income", "i", "доход", "д"];

/// Parse a `YYYY-MM-DD` date. Blank input means `today`.
pub fn parse_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let s = raw.trim();
    if s.is_empty() {
        return Ok(today);
    }
    parse_iso_date(s).ok_or_else(|| ValidationError::InvalidDate(s.to_string()))
}

/// Strict `YYYY-MM-DD`: four-digit year, zero-padded month and day, no sign.
/// Used for both typed input and stored rows.
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    if !ISO_DATE.is_match(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse a strictly positive amount. A comma is accepted as the decimal
/// separator, so `12,50` and `12.50` are the same value.
///
/// Amounts that would be written as `0.00` are rejected along with zero and
/// negatives, since they could not be read back as positive.
pub fn parse_amount(raw: &str) -> Result<f64, ValidationError> {
    let s = raw.trim().replace(',', ".");
    let value: f64 = s
        .parse()
        .map_err(|_| ValidationError::InvalidAmount(raw.trim().to_string()))?;
    if !value.is_finite() {
        return Err(ValidationError::InvalidAmount(raw.trim().to_string()));
    }
    if value < 0.005 {
        return Err(ValidationError::NonPositiveAmount(raw.trim().to_string()));
    }
    Ok(value)
}

/// Map a type token to [`Kind`]. Case-insensitive; accepts the English and
/// Russian words and their one-letter forms.
pub fn normalize_type(raw: &str) -> Result<Kind, ValidationError> {
    let s = raw.trim().to_lowercase();
    if EXPENSE_TOKENS.contains(&s.as_str()) {
        return Ok(Kind::Expense);
    }
    if INCOME_TOKENS.contains(&s.as_str()) {
        return Ok(Kind::Income);
    }
    Err(ValidationError::UnknownType(raw.trim().to_string()))
}

/// Trim and lowercase; blank becomes [`DEFAULT_CATEGORY`].
pub fn normalize_category(raw: &str) -> String {
    let s = raw.trim().to_lowercase();
    if s.is_empty() {
        DEFAULT_CATEGORY.to_string()
    } else {
        s
    }
}

/// Trim and fold line breaks into spaces so a record stays on one line.
pub fn normalize_comment(raw: &str) -> String {
    raw.trim()
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn test_parse_date_blank_is_today() {
        assert_eq!(parse_date("", today()), Ok(today()));
        assert_eq!(parse_date("   ", today()), Ok(today()));
    }

    #[test]
    fn test_parse_date_iso() {
        assert_eq!(
            parse_date(" 2025-01-02 ", today()),
            Ok(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap())
        );
    }

    #[test]
    fn test_parse_date_rejects_other_shapes() {
        for raw in ["2025-1-2", "02/01/2025", "2025-02-30", "yesterday", "2025-01-02T10:00"] {
            assert!(
                matches!(parse_date(raw, today()), Err(ValidationError::InvalidDate(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_iso_date_is_strict() {
        assert_eq!(parse_iso_date("2025-01-02"), NaiveDate::from_ymd_opt(2025, 1, 2));
        for raw in ["2025-1-2", "+2025-01-02", "02025-01-02", " 2025-01-02", "2025-13-01"] {
            assert_eq!(parse_iso_date(raw), None, "{raw} should be rejected");
        }
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12,50"), Ok(12.5));
        assert_eq!(parse_amount(" 1200 "), Ok(1200.0));
        assert_eq!(parse_amount("0.01"), Ok(0.01));
    }

    #[test]
    fn test_parse_amount_rejects_non_positive() {
        assert!(matches!(parse_amount("-5"), Err(ValidationError::NonPositiveAmount(_))));
        assert!(matches!(parse_amount("0"), Err(ValidationError::NonPositiveAmount(_))));
        assert!(matches!(parse_amount("0.001"), Err(ValidationError::NonPositiveAmount(_))));
    }

    #[test]
    fn test_parse_amount_rejects_text() {
        for raw in ["abc", "", "1.2.3", "inf", "NaN", "1,234.50"] {
            assert!(
                matches!(parse_amount(raw), Err(ValidationError::InvalidAmount(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_normalize_type_bilingual() {
        assert_eq!(normalize_type("доход"), Ok(Kind::Income));
        assert_eq!(normalize_type("income"), Ok(Kind::Income));
        assert_eq!(normalize_type("I"), Ok(Kind::Income));
        assert_eq!(normalize_type("Д"), Ok(Kind::Income));
        assert_eq!(normalize_type("РАСХОД"), Ok(Kind::Expense));
        assert_eq!(normalize_type(" e "), Ok(Kind::Expense));
        assert_eq!(normalize_type("р"), Ok(Kind::Expense));
    }

    #[test]
    fn test_normalize_type_unknown() {
        assert_eq!(
            normalize_type("transfer"),
            Err(ValidationError::UnknownType("transfer".to_string()))
        );
    }

    #[test]
    fn test_normalize_category() {
        assert_eq!(normalize_category("  Food "), "food");
        assert_eq!(normalize_category(""), "other");
        assert_eq!(normalize_category("   "), "other");
        assert_eq!(normalize_category("Здоровье"), "здоровье");
    }

    #[test]
    fn test_normalize_comment() {
        assert_eq!(normalize_comment("  lunch "), "lunch");
        assert_eq!(normalize_comment("line one\r\nline two\n"), "line one line two");
        assert_eq!(normalize_comment(""), "");
    }
}
