//! Plain-text and JSON rendering of ledger results.

use anyhow::Result;
use chrono::NaiveDate;
use finlog_core::{CategoryTotal, Period, Summary, Transaction, TxnId};
use serde::Serialize;
use std::fmt::Write;

#[derive(Serialize)]
struct NumberedRow<'a> {
    id: TxnId,
    #[serde(flatten)]
    txn: &'a Transaction,
}

/// `start`/`end` are null for the all-time period
#[derive(Serialize)]
struct PeriodReport<'a, T: Serialize> {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    #[serde(flatten)]
    body: &'a T,
}

impl<'a, T: Serialize> PeriodReport<'a, T> {
    fn new(period: &Period, body: &'a T) -> Self {
        let bounded = !period.is_unbounded();
        Self {
            start: bounded.then(|| period.start()),
            end: bounded.then(|| period.end()),
            body,
        }
    }
}

#[derive(Serialize)]
struct TopReport<'a> {
    categories: &'a [CategoryTotal],
}

pub fn transactions_table(rows: &[(TxnId, Transaction)]) -> String {
    if rows.is_empty() {
        return "(empty)\n".to_string();
    }
    let mut out = String::new();
    let _ = writeln!(out, "  # | date       | type    | category     |   amount | comment");
    let _ = writeln!(out, "----+------------+---------+--------------+----------+--------");
    for (id, t) in rows {
        let _ = writeln!(
            out,
            "{:>3} | {} | {:<7} | {:<12} | {:>8.2} | {}",
            id.get(),
            t.date().format("%Y-%m-%d"),
            t.kind().as_str(),
            t.category(),
            t.amount(),
            t.comment()
        );
    }
    out
}

pub fn summary_text(period: &Period, s: &Summary) -> String {
    format!(
        "Totals for {period}:\nIncome : {:.2}\nExpense: {:.2}\nBalance: {:.2}\n",
        s.income, s.expense, s.balance
    )
}

pub fn top_text(period: &Period, top: &[CategoryTotal]) -> String {
    if top.is_empty() {
        return format!("No expenses for {period}\n");
    }
    let mut out = format!("Top expense categories for {period}:\n");
    for (i, c) in top.iter().enumerate() {
        let _ = writeln!(out, "{}. {}: {:.2}", i + 1, c.category, c.total);
    }
    out
}

pub fn transactions_json(rows: &[(TxnId, Transaction)]) -> Result<String> {
    let rows: Vec<NumberedRow> = rows.iter().map(|(id, txn)| NumberedRow { id: *id, txn }).collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

pub fn summary_json(period: &Period, s: &Summary) -> Result<String> {
    Ok(serde_json::to_string_pretty(&PeriodReport::new(period, s))?)
}

pub fn top_json(period: &Period, top: &[CategoryTotal]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&PeriodReport::new(period, &TopReport { categories: top }))?)
}
