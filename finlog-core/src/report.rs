//! Period filtering, totals and category ranking over a transaction slice.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::transaction::{Kind, Transaction};

/// Default number of categories returned by [`top_expense_categories`]
pub const DEFAULT_TOP_N: usize = 5;

/// Income, expense and their difference over a set of transactions
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

/// Total spent in one category
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Transactions dated within `start..=end`, in input order.
/// `start > end` simply yields nothing; callers that need it rejected use
/// [`crate::Period::new`].
pub fn filter_by_period(txns: &[Transaction], start: NaiveDate, end: NaiveDate) -> Vec<&Transaction> {
    txns.iter()
        .filter(|t| start <= t.date() && t.date() <= end)
        .collect()
}

/// Sum income and expense in input order.
pub fn summary<'a, I>(txns: I) -> Summary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut income = 0.0;
    let mut expense = 0.0;
    for t in txns {
        match t.kind() {
            Kind::Income => income += t.amount(),
            Kind::Expense => expense += t.amount(),
        }
    }
    Summary {
        income,
        expense,
        balance: income - expense,
    }
}

/// Expense totals per category, largest first, at most `top_n` entries.
///
/// Equal totals keep the order in which their category first appeared in
/// `txns`.
pub fn top_expense_categories<'a, I>(txns: I, top_n: usize) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for t in txns.into_iter().filter(|t| t.is_expense()) {
        let idx = *slots.entry(t.category()).or_insert_with(|| {
            totals.push(CategoryTotal {
                category: t.category().to_string(),
                total: 0.0,
            });
            totals.len() - 1
        });
        totals[idx].total += t.amount();
    }

    // sort_by is stable, which gives the first-seen tie-break
    totals.sort_by(|a, b| b.total.total_cmp(&a.total));
    totals.truncate(top_n);
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(d: u32, category: &str, amount: f64) -> Transaction {
        Transaction::new(date(2025, 3, d), Kind::Expense, category, amount, "")
    }

    fn income(d: u32, category: &str, amount: f64) -> Transaction {
        Transaction::new(date(2025, 3, d), Kind::Income, category, amount, "")
    }

    #[test]
    fn test_filter_inclusive_bounds() {
        let txns = vec![expense(1, "a", 1.0), expense(5, "b", 1.0), expense(9, "c", 1.0)];
        let hit = filter_by_period(&txns, date(2025, 3, 1), date(2025, 3, 5));
        let cats: Vec<_> = hit.iter().map(|t| t.category()).collect();
        assert_eq!(cats, vec!["a", "b"]);
    }

    #[test]
    fn test_filter_single_day() {
        let txns = vec![
            expense(4, "a", 1.0),
            expense(5, "b", 1.0),
            income(5, "c", 1.0),
            expense(6, "d", 1.0),
        ];
        let d = date(2025, 3, 5);
        let hit = filter_by_period(&txns, d, d);
        assert_eq!(hit.len(), 2);
        assert!(hit.iter().all(|t| t.date() == d));
    }

    #[test]
    fn test_filter_keeps_input_order_and_duplicates() {
        let txns = vec![expense(9, "late", 1.0), expense(2, "early", 1.0), expense(9, "late", 1.0)];
        let hit = filter_by_period(&txns, date(2025, 3, 1), date(2025, 3, 31));
        let cats: Vec<_> = hit.iter().map(|t| t.category()).collect();
        assert_eq!(cats, vec!["late", "early", "late"]);
    }

    #[test]
    fn test_filter_reversed_range_is_empty() {
        let txns = vec![expense(5, "a", 1.0)];
        assert!(filter_by_period(&txns, date(2025, 3, 9), date(2025, 3, 1)).is_empty());
    }

    #[test]
    fn test_summary_scenario() {
        let txns = vec![
            Transaction::new(date(2025, 3, 1), Kind::Expense, "food", 12.5, "lunch"),
            Transaction::new(date(2025, 3, 5), Kind::Income, "salary", 1000.0, ""),
        ];
        let s = summary(&txns);
        assert_eq!(s.income, 1000.0);
        assert_eq!(s.expense, 12.5);
        assert_eq!(s.balance, 987.5);
    }

    #[test]
    fn test_summary_empty_is_zero() {
        assert_eq!(summary(&Vec::<Transaction>::new()), Summary::default());
    }

    #[test]
    fn test_summary_balance_identity() {
        let txns = vec![income(1, "x", 3.3), expense(2, "y", 7.7), expense(3, "z", 0.1), income(4, "x", 2.2)];
        let s = summary(&txns);
        assert!(s.income >= 0.0 && s.expense >= 0.0);
        assert_eq!(s.balance, s.income - s.expense);
    }

    #[test]
    fn test_summary_over_filtered_refs() {
        let txns = vec![income(1, "x", 10.0), expense(20, "y", 4.0)];
        let subset = filter_by_period(&txns, date(2025, 3, 1), date(2025, 3, 10));
        let s = summary(subset);
        assert_eq!(s.income, 10.0);
        assert_eq!(s.expense, 0.0);
    }

    #[test]
    fn test_top_categories_scenario() {
        let txns = vec![expense(1, "food", 30.0), expense(2, "food", 20.0), expense(3, "transport", 10.0)];
        let top = top_expense_categories(&txns, DEFAULT_TOP_N);
        assert_eq!(
            top,
            vec![
                CategoryTotal { category: "food".into(), total: 50.0 },
                CategoryTotal { category: "transport".into(), total: 10.0 },
            ]
        );
    }

    #[test]
    fn test_top_categories_ignores_income() {
        let txns = vec![income(1, "salary", 500.0), expense(2, "food", 5.0)];
        let top = top_expense_categories(&txns, 5);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].category, "food");
    }

    #[test]
    fn test_top_categories_limit_and_order() {
        let txns = vec![
            expense(1, "a", 1.0),
            expense(1, "b", 6.0),
            expense(1, "c", 3.0),
            expense(1, "d", 9.0),
            expense(1, "e", 2.0),
            expense(1, "f", 4.0),
        ];
        let top = top_expense_categories(&txns, 3);
        assert_eq!(top.len(), 3);
        for w in top.windows(2) {
            assert!(w[0].total >= w[1].total);
        }
        assert_eq!(top[0].category, "d");
    }

    #[test]
    fn test_top_categories_tie_keeps_first_seen() {
        let txns = vec![expense(1, "zeta", 5.0), expense(2, "alpha", 5.0), expense(3, "mid", 5.0)];
        let top = top_expense_categories(&txns, 5);
        let cats: Vec<_> = top.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(cats, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_top_categories_empty() {
        let txns = vec![income(1, "salary", 100.0)];
        assert!(top_expense_categories(&txns, 5).is_empty());
        assert!(top_expense_categories(&txns[..0], 5).is_empty());
    }
}
