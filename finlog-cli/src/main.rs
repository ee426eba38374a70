use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use finlog_core::{Period, TxnId, parse_date, time::today_in};
use finlog_store::CsvStore;
use std::io;
use std::path::PathBuf;

mod commands;
mod config;
mod menu;
mod render;
mod state;

use commands::AddInput;
use config::Config;

#[derive(Parser, Debug)]
#[command(name = "finlog", version, about = "Personal income/expense ledger")]
struct Cli {
    /// Ledger CSV file (overrides storage.data_file from the config)
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Print list/summary/top results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Ledger(LedgerCommand),

    /// Inspect or create ~/.finlog/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Commands that work on the ledger file
#[derive(Subcommand, Debug)]
enum LedgerCommand {
    /// Record a transaction
    Add {
        /// Amount, e.g. 12.50 or 12,50
        #[arg(long, allow_hyphen_values = true)]
        amount: String,

        /// expense/income (also e/i, расход/доход, р/д)
        #[arg(long, visible_alias = "type")]
        kind: String,

        /// YYYY-MM-DD (default: today)
        #[arg(long, default_value = "")]
        date: String,

        /// Category label (default: other)
        #[arg(long, default_value = "")]
        category: String,

        #[arg(long, default_value = "")]
        comment: String,
    },

    /// List transactions in a period, numbered for `delete`
    List {
        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Income, expense and balance for a period
    Summary {
        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Largest expense categories for a period
    Top {
        #[command(flatten)]
        period: PeriodArgs,

        /// Number of categories (default: reports.top_n from the config)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Delete a transaction by the number shown in `list --period all`
    Delete { number: u32 },

    /// Interactive menu (the default when no command is given)
    Menu,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum PeriodPreset {
    Today,
    Week,
    Month,
    All,
}

#[derive(Args, Debug, Clone, Default)]
struct PeriodArgs {
    /// Preset period (default: month)
    #[arg(long, value_enum, conflicts_with_all = ["from", "to"])]
    period: Option<PeriodPreset>,

    /// Custom period start, YYYY-MM-DD
    #[arg(long, requires = "to")]
    from: Option<String>,

    /// Custom period end, YYYY-MM-DD
    #[arg(long, requires = "from")]
    to: Option<String>,
}

impl PeriodArgs {
    fn resolve(&self, today: NaiveDate) -> Result<Period> {
        if let (Some(from), Some(to)) = (&self.from, &self.to) {
            let start = parse_date(from, today)?;
            let end = parse_date(to, today)?;
            return Ok(Period::new(start, end)?);
        }
        Ok(match self.period.unwrap_or(PeriodPreset::Month) {
            PeriodPreset::Today => Period::day(today),
            PeriodPreset::Week => Period::last_days(today, 7),
            PeriodPreset::Month => Period::month_to_date(today),
            PeriodPreset::All => Period::all(),
        })
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let cfg = config::load_config()?;

    match cli.command {
        Some(Command::Config { command }) => run_config_command(command, &cfg),
        Some(Command::Ledger(command)) => run_ledger_command(command, &cfg, cli.file, cli.json),
        None => run_ledger_command(LedgerCommand::Menu, &cfg, cli.file, cli.json),
    }
}

fn run_config_command(command: ConfigCommand, cfg: &Config) -> Result<()> {
    match command {
        ConfigCommand::Init => config::init_config(),
        ConfigCommand::Show => {
            print!("{}", config::render_config(cfg)?);
            Ok(())
        }
    }
}

fn run_ledger_command(command: LedgerCommand, cfg: &Config, file: Option<PathBuf>, json: bool) -> Result<()> {
    let store = CsvStore::new(cfg.data_file(file.as_deref())?);
    let today = today_in(&cfg.clock.timezone).context("resolving today's date (check clock.timezone)")?;

    match command {
        LedgerCommand::Add {
            amount,
            kind,
            date,
            category,
            comment,
        } => {
            let input = AddInput {
                date,
                kind,
                category,
                amount,
                comment,
            };
            let t = commands::add(&store, input, today)?;
            println!(
                "Saved: {} {} {} {:.2} to {}",
                t.date().format("%Y-%m-%d"),
                t.kind(),
                t.category(),
                t.amount(),
                store.path().display()
            );
        }

        LedgerCommand::List { period } => {
            let period = period.resolve(today)?;
            let rows = commands::list(&store, &period)?;
            if json {
                println!("{}", render::transactions_json(&rows)?);
            } else {
                println!("Transactions for {period}:");
                print!("{}", render::transactions_table(&rows));
            }
        }

        LedgerCommand::Summary { period } => {
            let period = period.resolve(today)?;
            let s = commands::summarize(&store, &period)?;
            if json {
                println!("{}", render::summary_json(&period, &s)?);
            } else {
                print!("{}", render::summary_text(&period, &s));
            }
        }

        LedgerCommand::Top { period, limit } => {
            let period = period.resolve(today)?;
            let top = commands::top(&store, &period, limit.unwrap_or(cfg.reports.top_n))?;
            if json {
                println!("{}", render::top_json(&period, &top)?);
            } else {
                print!("{}", render::top_text(&period, &top));
            }
        }

        LedgerCommand::Delete { number } => {
            let removed = commands::delete(&store, TxnId::new(number))?;
            println!(
                "Deleted #{number}: {} {} {} {:.2}",
                removed.date().format("%Y-%m-%d"),
                removed.kind(),
                removed.category(),
                removed.amount()
            );
        }

        LedgerCommand::Menu => {
            let tz = cfg.clock.timezone.as_str();
            let clock = || today_in(tz).context("resolving today's date (check clock.timezone)");
            let stdin = io::stdin();
            menu::Menu::new(&store, stdin.lock(), io::stdout(), clock, cfg.reports.top_n).run()?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use finlog_core::RangeError;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_period_default_is_month() {
        let p = PeriodArgs::default().resolve(today()).unwrap();
        assert_eq!(p, Period::month_to_date(today()));
    }

    #[test]
    fn test_period_custom_range() {
        let cli = Cli::parse_from(["finlog", "summary", "--from", "2025-01-01", "--to", "2025-01-31"]);
        let Some(Command::Ledger(LedgerCommand::Summary { period })) = cli.command else {
            panic!("expected summary");
        };
        let p = period.resolve(today()).unwrap();
        assert_eq!(p.start(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(p.end(), NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
    }

    #[test]
    fn test_period_reversed_range_fails() {
        let args = PeriodArgs {
            period: None,
            from: Some("2025-02-01".into()),
            to: Some("2025-01-01".into()),
        };
        let err = args.resolve(today()).unwrap_err();
        assert!(matches!(err.downcast_ref::<RangeError>(), Some(RangeError::EndBeforeStart { .. })));
    }

    #[test]
    fn test_period_flags_conflict() {
        let res = Cli::try_parse_from(["finlog", "list", "--period", "week", "--from", "2025-01-01", "--to", "2025-01-02"]);
        assert!(res.is_err());
        assert!(Cli::try_parse_from(["finlog", "list", "--from", "2025-01-01"]).is_err());
    }

    #[test]
    fn test_add_args() {
        let cli = Cli::parse_from(["finlog", "--file", "/tmp/x.csv", "add", "--amount", "-5", "--type", "e"]);
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/x.csv")));
        let Some(Command::Ledger(LedgerCommand::Add { amount, kind, date, category, .. })) = cli.command else {
            panic!("expected add");
        };
        assert_eq!(amount, "-5");
        assert_eq!(kind, "e");
        assert_eq!(date, "");
        assert_eq!(category, "");
    }

    #[test]
    fn test_config_and_ledger_commands_route_apart() {
        let cli = Cli::parse_from(["finlog", "config", "show"]);
        assert!(matches!(cli.command, Some(Command::Config { command: ConfigCommand::Show })));
        let cli = Cli::parse_from(["finlog", "delete", "3"]);
        assert!(matches!(cli.command, Some(Command::Ledger(LedgerCommand::Delete { number: 3 }))));
        let cli = Cli::parse_from(["finlog", "menu"]);
        assert!(matches!(cli.command, Some(Command::Ledger(LedgerCommand::Menu))));
    }

    #[test]
    fn test_no_command_means_menu() {
        let cli = Cli::parse_from(["finlog"]);
        assert!(cli.command.is_none());
    }
}
