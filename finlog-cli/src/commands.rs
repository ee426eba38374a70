//! Ledger operations shared by the subcommands and the interactive menu.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use finlog_core::{
    CategoryTotal, Ledger, Period, Summary, Transaction, TxnId, normalize_category, normalize_comment,
    normalize_type, parse_amount, parse_date, summary, top_expense_categories,
};
use finlog_store::TransactionStore;
use log::info;

/// Raw user input for a new transaction, exactly as typed
#[derive(Debug, Clone, Default)]
pub struct AddInput {
    pub date: String,
    pub kind: String,
    pub category: String,
    pub amount: String,
    pub comment: String,
}

impl AddInput {
    /// Validate every field; `today` fills in a blank date.
    pub fn into_transaction(self, today: NaiveDate) -> Result<Transaction> {
        let date = parse_date(&self.date, today)?;
        let kind = normalize_type(&self.kind)?;
        let category = normalize_category(&self.category);
        let amount = parse_amount(&self.amount)?;
        let comment = normalize_comment(&self.comment);
        Ok(Transaction::new(date, kind, category, amount, comment))
    }
}

pub fn add<S: TransactionStore>(store: &S, input: AddInput, today: NaiveDate) -> Result<Transaction> {
    let t = input.into_transaction(today)?;
    store.append(&t).context("saving transaction")?;
    info!("added {} {} {:.2}", t.kind(), t.category(), t.amount());
    Ok(t)
}

/// Load the whole ledger so entries keep the numbers shown by an unfiltered listing.
pub fn load_ledger<S: TransactionStore>(store: &S) -> Result<Ledger> {
    let txns = store.load().context("loading transactions")?;
    Ok(Ledger::from_transactions(txns))
}

/// Entries dated within `period`, each with its ledger number
pub fn list<S: TransactionStore>(store: &S, period: &Period) -> Result<Vec<(TxnId, Transaction)>> {
    let ledger = load_ledger(store)?;
    Ok(ledger
        .iter()
        .filter(|(_, t)| period.contains(t.date()))
        .map(|(id, t)| (id, t.clone()))
        .collect())
}

pub fn summarize<S: TransactionStore>(store: &S, period: &Period) -> Result<Summary> {
    let txns = store.load().context("loading transactions")?;
    Ok(summary(period.filter(&txns)))
}

pub fn top<S: TransactionStore>(store: &S, period: &Period, limit: usize) -> Result<Vec<CategoryTotal>> {
    let txns = store.load().context("loading transactions")?;
    Ok(top_expense_categories(period.filter(&txns), limit))
}

/// Remove entry `id` and rewrite the store; returns what was removed.
pub fn delete<S: TransactionStore>(store: &S, id: TxnId) -> Result<Transaction> {
    let mut ledger = load_ledger(store)?;
    let removed = ledger.remove(id)?;
    store.save_all(&ledger.transactions()).context("rewriting transactions")?;
    info!("deleted #{id}");
    Ok(removed)
}
