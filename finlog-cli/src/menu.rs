//! Interactive numbered menu. Errors from an action are printed and the loop
//! goes on; end of input leaves the loop. "Today" is asked of the clock at
//! each action, so a session kept open past midnight moves on with the date.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use finlog_core::{Period, TxnId, parse_date};
use finlog_store::TransactionStore;
use std::io::{BufRead, Write};

use crate::commands::{self, AddInput};
use crate::render;

pub struct Menu<'a, S, R, W, C> {
    store: &'a S,
    input: R,
    out: W,
    clock: C,
    top_n: usize,
}

impl<'a, S, R, W, C> Menu<'a, S, R, W, C>
where
    S: TransactionStore,
    R: BufRead,
    W: Write,
    C: Fn() -> Result<NaiveDate>,
{
    pub fn new(store: &'a S, input: R, out: W, clock: C, top_n: usize) -> Self {
        Self {
            store,
            input,
            out,
            clock,
            top_n,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.out, "\n=== finlog ===")?;
            writeln!(self.out, "1. Add transaction")?;
            writeln!(self.out, "2. List transactions")?;
            writeln!(self.out, "3. Summary")?;
            writeln!(self.out, "4. Top expense categories")?;
            writeln!(self.out, "5. Delete transaction")?;
            writeln!(self.out, "0. Quit")?;

            let Some(choice) = self.read_line("> ")? else {
                break;
            };

            let result = match choice.as_str() {
                "1" => self.add(),
                "2" => self.list(),
                "3" => self.summary(),
                "4" => self.top(),
                "5" => self.delete(),
                "0" | "q" => break,
                _ => {
                    writeln!(self.out, "Unknown option.")?;
                    Ok(())
                }
            };
            if let Err(e) = result {
                writeln!(self.out, "Error: {e:#}")?;
            }
        }
        writeln!(self.out, "Bye!")?;
        Ok(())
    }

    /// `None` at end of input
    fn read_line(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush().ok();
        let mut s = String::new();
        if self.input.read_line(&mut s)? == 0 {
            return Ok(None);
        }
        Ok(Some(s.trim().to_string()))
    }

    fn prompt(&mut self, label: &str) -> Result<String> {
        match self.read_line(label)? {
            Some(s) => Ok(s),
            None => bail!("input closed"),
        }
    }

    fn choose_period(&mut self) -> Result<Period> {
        writeln!(self.out, "\nPeriod:")?;
        writeln!(self.out, "1) Today")?;
        writeln!(self.out, "2) Last 7 days")?;
        writeln!(self.out, "3) Current month")?;
        writeln!(self.out, "4) Custom (from - to)")?;
        let today = (self.clock)()?;
        match self.prompt("> ")?.as_str() {
            "1" => Ok(Period::day(today)),
            "2" => Ok(Period::last_days(today, 7)),
            "3" => Ok(Period::month_to_date(today)),
            "4" => {
                let start = parse_date(&self.prompt("From (YYYY-MM-DD): ")?, today)?;
                let end = parse_date(&self.prompt("To (YYYY-MM-DD): ")?, today)?;
                Ok(Period::new(start, end)?)
            }
            _ => bail!("unknown period choice"),
        }
    }

    fn add(&mut self) -> Result<()> {
        writeln!(self.out, "\nNew transaction")?;
        let input = AddInput {
            date: self.prompt("Date (YYYY-MM-DD, blank = today): ")?,
            kind: self.prompt("Type (expense/income): ")?,
            category: self.prompt("Category (e.g. food/health/transport/bills/other): ")?,
            amount: self.prompt("Amount: ")?,
            comment: self.prompt("Comment (optional): ")?,
        };
        let today = (self.clock)()?;
        commands::add(self.store, input, today)?;
        writeln!(self.out, "Saved.")?;
        Ok(())
    }

    fn list(&mut self) -> Result<()> {
        let period = self.choose_period()?;
        let rows = commands::list(self.store, &period)?;
        writeln!(self.out, "\nTransactions for {period}:")?;
        write!(self.out, "{}", render::transactions_table(&rows))?;
        Ok(())
    }

    fn summary(&mut self) -> Result<()> {
        let period = self.choose_period()?;
        let s = commands::summarize(self.store, &period)?;
        write!(self.out, "\n{}", render::summary_text(&period, &s))?;
        Ok(())
    }

    fn top(&mut self) -> Result<()> {
        let period = self.choose_period()?;
        let top = commands::top(self.store, &period, self.top_n)?;
        write!(self.out, "\n{}", render::top_text(&period, &top))?;
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        let rows = commands::list(self.store, &Period::all())?;
        if rows.is_empty() {
            writeln!(self.out, "\nNothing to delete, the ledger is empty.")?;
            return Ok(());
        }
        writeln!(self.out, "\nAll transactions:")?;
        write!(self.out, "{}", render::transactions_table(&rows))?;

        let raw = self.prompt("\nNumber to delete (0 = cancel): ")?;
        let Ok(n) = raw.parse::<u32>() else {
            writeln!(self.out, "Enter a number.")?;
            return Ok(());
        };
        if n == 0 {
            return Ok(());
        }
        let removed = commands::delete(self.store, TxnId::new(n))?;
        writeln!(
            self.out,
            "Deleted: {} {} {} {:.2}",
            removed.date().format("%Y-%m-%d"),
            removed.kind(),
            removed.category(),
            removed.amount()
        )?;
        Ok(())
    }
}
