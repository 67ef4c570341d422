use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tally_core::{
    Category, Clock, Ledger, Report, SortOrder, ViewParams, parse_amount, select, summarize,
};
use tracing_subscriber::EnvFilter;

mod config;
mod export;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Track daily expenses from the terminal")]
struct Cli {
    /// Data file (default: $TALLY_HOME/expenses.json)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone, Default)]
struct ViewArgs {
    /// Only show one category (food, household, social, other, uncategorized)
    #[arg(long)]
    category: Option<Category>,

    /// Case-insensitive keyword matched against titles
    #[arg(long, default_value = "")]
    search: String,
}

impl ViewArgs {
    fn params(&self, sort: SortOrder) -> ViewParams {
        ViewParams {
            category: self.category,
            search: self.search.clone(),
            sort,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log a new expense dated today
    Add {
        title: String,

        /// Amount, e.g. 980, 1,200 or -300 for a refund
        #[arg(allow_hyphen_values = true)]
        amount: String,

        #[arg(long, default_value = "uncategorized")]
        category: Category,
    },

    /// Show expenses
    List {
        #[command(flatten)]
        view: ViewArgs,

        /// latest, highest or lowest (default from config)
        #[arg(long)]
        sort: Option<SortOrder>,
    },

    /// Change the amount of an existing expense
    Update {
        /// Expense id (a unique prefix is enough)
        id: String,

        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Delete one expense
    Delete {
        /// Expense id (a unique prefix is enough)
        id: String,
    },

    /// Delete every expense, or only those on one date
    Clear {
        /// YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Totals, averages, category breakdown and month-end projection
    Stats {
        #[command(flatten)]
        view: ViewArgs,

        /// Number of top days to list (default from config)
        #[arg(long)]
        top: Option<usize>,
    },

    /// Write the selected expenses as CSV
    Export {
        #[command(flatten)]
        view: ViewArgs,

        #[arg(long)]
        sort: Option<SortOrder>,

        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Manage ~/.tally/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    // must work even when the existing config is broken
    if let Command::Config {
        command: ConfigCommand::Init,
    } = cli.command
    {
        init_tracing("warn");
        return config::init_config();
    }

    let cfg = config::load_config()?;
    init_tracing(&cfg.log_level);

    let data_path = match cli.data.clone().or_else(|| cfg.data_file.clone()) {
        Some(p) => p,
        None => state::default_data_path()?,
    };
    tracing::debug!(path = %data_path.display(), "using data file");

    match cli.command {
        Command::Add {
            title,
            amount,
            category,
        } => {
            let amount = parse_amount(&amount)?;
            let clock = cfg.clock()?;
            let mut ledger = load_ledger(&data_path)?;
            let added = ledger
                .add(&title, amount, category, clock.as_ref())
                .context("add expense")?
                .clone();
            save_ledger(&data_path, &ledger)?;
            println!(
                "Added {} | {} | {} | {} ({})",
                added.id,
                added.date,
                added.title,
                cfg.format_amount(added.amount),
                added.category
            );
        }

        Command::List { view, sort } => {
            let ledger = load_ledger(&data_path)?;
            let params = view.params(sort.unwrap_or(cfg.default_sort));
            let rows = select(ledger.items(), &params);
            if rows.is_empty() {
                println!("No expenses.");
            }
            for e in &rows {
                println!(
                    "{}  {}  {:<24} {:>14}  {}",
                    e.date,
                    short_id(&e.id),
                    e.title,
                    cfg.format_amount(e.amount),
                    e.category
                );
            }
            let totals = summarize(&rows);
            println!("\nTotal: {} ({} items)", cfg.format_amount(totals.sum), totals.count);
        }

        Command::Update { id, amount } => {
            let amount = parse_amount(&amount)?;
            let mut ledger = load_ledger(&data_path)?;
            let id = resolve_id(&ledger, &id)?;
            ledger.update_amount(&id, amount).context("update amount")?;
            save_ledger(&data_path, &ledger)?;
            println!("Updated {} -> {}", id, cfg.format_amount(amount));
        }

        Command::Delete { id } => {
            let mut ledger = load_ledger(&data_path)?;
            let id = resolve_id(&ledger, &id)?;
            let removed = ledger.delete(&id).context("delete expense")?;
            save_ledger(&data_path, &ledger)?;
            println!("Deleted {} ({})", removed.title, cfg.format_amount(removed.amount));
        }

        Command::Clear { date } => {
            let mut ledger = load_ledger(&data_path)?;
            let removed = match date {
                Some(d) => ledger.clear_by_date(d),
                None => ledger.clear_all(),
            };
            save_ledger(&data_path, &ledger)?;
            match date {
                Some(d) => println!("Removed {removed} expenses dated {d}"),
                None => println!("Removed {removed} expenses"),
            }
        }

        Command::Stats { view, top } => {
            let clock = cfg.clock()?;
            let ledger = load_ledger(&data_path)?;
            let params = view.params(cfg.default_sort);
            let report = Report::build(ledger.items(), &params, clock.now(), top.unwrap_or(cfg.top_days));
            print_report(&cfg, &report);
        }

        Command::Export { view, sort, out } => {
            let ledger = load_ledger(&data_path)?;
            let params = view.params(sort.unwrap_or(cfg.default_sort));
            let rows = select(ledger.items(), &params);
            match out {
                Some(path) => {
                    let file = std::fs::File::create(&path)
                        .with_context(|| format!("create {}", path.display()))?;
                    export::write_csv(file, &rows)?;
                    eprintln!("Exported {} expenses to {}", rows.len(), path.display());
                }
                None => export::write_csv(std::io::stdout().lock(), &rows)?,
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let text = toml::to_string_pretty(&cfg).context("serialize config")?;
                println!("# {}", config::config_path()?.display());
                print!("{text}");
            }
        },
    }

    Ok(())
}

/// RUST_LOG wins; otherwise the config's level. Logs go to stderr so
/// `tally export` output stays clean.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_ledger(path: &Path) -> Result<Ledger> {
    Ok(Ledger::from_items(state::load_expenses(path)?))
}

fn save_ledger(path: &Path, ledger: &Ledger) -> Result<()> {
    state::save_expenses(path, ledger.items())
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Expand a full id or a unique prefix of one.
fn resolve_id(ledger: &Ledger, needle: &str) -> Result<String> {
    if ledger.get(needle).is_some() {
        return Ok(needle.to_string());
    }
    let matches: Vec<&str> = ledger
        .items()
        .iter()
        .map(|e| e.id.as_str())
        .filter(|id| !needle.is_empty() && id.starts_with(needle))
        .collect();
    match matches.as_slice() {
        [only] => Ok(only.to_string()),
        [] => bail!("no expense with id {needle}"),
        _ => bail!("id prefix {needle} is ambiguous ({} matches)", matches.len()),
    }
}

fn print_report(cfg: &Config, report: &Report<'_>) {
    let s = &report.summary;
    let money = |v: f64| cfg.format_amount(v);

    println!("# Summary\n");
    println!("Count:   {}", s.count);
    println!("Total:   {}", money(s.sum));
    println!("Average: {}", money(s.average));
    match (s.max_item, s.min_item) {
        (Some(max), Some(min)) => {
            println!("Highest: {} ({})", money(s.max), max.title);
            println!("Lowest:  {} ({})", money(s.min), min.title);
        }
        _ => println!("Highest: -\nLowest:  -"),
    }

    println!("\n# Periods\n");
    println!("Today:      {}", money(report.periods.today));
    println!("Yesterday:  {}", money(report.periods.yesterday));
    println!("This week:  {}", money(report.periods.this_week));
    println!("This month: {}", money(report.periods.this_month));
    println!("Last month: {}", money(report.periods.last_month));

    if let Some(p) = &report.projection {
        println!(
            "Projected month end: {} ({} per day)",
            money(p.projected_total),
            money(p.per_day_average)
        );
    }

    println!("\n# Categories\n");
    if report.categories.is_empty() {
        println!("(none)");
    }
    for (category, t) in report.categories.iter() {
        println!("- {:<14} {:>4} items  {}", category.label(), t.count, money(t.sum));
    }
    if let Some(top) = report.top_category {
        println!("Most frequent: {top}");
    }

    println!("\n# Top days\n");
    if report.top_days.is_empty() {
        println!("(none)");
    }
    for (i, (date, sum)) in report.top_days.iter().enumerate() {
        println!("{}. {}  {}", i + 1, date, money(*sum));
    }
}
