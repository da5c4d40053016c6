//! Finboard main entry point

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use finboard_config::Config;
use finboard_core::{
    CoreError, CoreResult, Dashboard, DateRange, DefaultErrorLogger, ErrorContext, ErrorLogger,
    FilterCriteria, TypeFilter,
};
use finboard_view::{render_page, PageOptions};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

const DEFAULT_CONFIG: &str = "config.yaml";

#[derive(Parser, Debug)]
#[command(name = "finboard")]
#[command(version = "0.1.0")]
#[command(about = "A static personal-finance and trading dashboard renderer", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the options of the transaction type selector
    Types,
    /// Print the filtered transaction list as JSON
    Transactions(FilterArgs),
    /// Print open positions with derived P&L fields as JSON
    Positions,
    /// Print the latest fills as JSON
    History {
        /// Only fills for this symbol
        #[arg(long)]
        symbol: Option<String>,
    },
    /// Render the dashboard as an HTML page
    Page {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Symbol synced between the watchlist and the history table
        #[arg(long)]
        symbol: Option<String>,
        #[command(flatten)]
        filter: FilterArgs,
    },
}

#[derive(clap::Args, Debug)]
struct FilterArgs {
    /// Transaction type: all, Deposit, ACH, Purchase, Withdrawal, Transfer
    #[arg(long = "type", default_value = "all")]
    kind: String,
    /// First day included (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,
    /// Last day included (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,
    /// Case-insensitive text matched against every field
    #[arg(long, default_value = "")]
    search: String,
    /// Show every match instead of the collapsed window
    #[arg(long)]
    expanded: bool,
}

impl FilterArgs {
    fn criteria(&self) -> CoreResult<FilterCriteria> {
        let type_filter: TypeFilter = self
            .kind
            .parse()
            .map_err(|message| CoreError::InvalidFilter { message })?;

        let from = self.from.as_deref().map(parse_day).transpose()?;
        let to = self.to.as_deref().map(parse_day).transpose()?;

        let mut criteria = FilterCriteria::new();
        criteria.set_type_filter(type_filter);
        if from.is_some() || to.is_some() {
            criteria.set_date_range(Some(DateRange { from, to }));
        }
        criteria.set_search_text(self.search.as_str());
        criteria.set_expanded(self.expanded);
        Ok(criteria)
    }
}

fn parse_day(value: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| CoreError::InvalidFilter {
        message: format!("Invalid date: {}", value),
    })
}

#[derive(Serialize)]
struct TypeOption {
    value: String,
    label: String,
}

fn print_json<T: Serialize>(value: &T) -> CoreResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CoreError::ParseError {
        message: e.to_string(),
    })?;
    println!("{}", json);
    Ok(())
}

/// Load the config file; a missing default file falls back to built-in defaults
fn load_config(path: &Path) -> anyhow::Result<(Config, bool)> {
    if !path.exists() && path == Path::new(DEFAULT_CONFIG) {
        return Ok((Config::default(), false));
    }
    let config = Config::load(path).map_err(|e| anyhow::anyhow!("{}", e.to_details()))?;
    Ok((config, true))
}

async fn run(command: Command, config: Config) -> CoreResult<()> {
    let dashboard = Dashboard::load(config).await?;

    match command {
        Command::Types => {
            let options: Vec<TypeOption> = dashboard
                .transaction_query()
                .types()
                .into_iter()
                .map(|t| TypeOption {
                    value: t.to_string(),
                    label: t.label(),
                })
                .collect();
            print_json(&options)
        }
        Command::Transactions(filter) => {
            let criteria = filter.criteria()?;
            let mut query = dashboard.transaction_query();
            let result = query.run(&criteria);
            print_json(&result)
        }
        Command::Positions => print_json(&dashboard.positions().metrics()),
        Command::History { symbol } => print_json(&dashboard.recent_trades(symbol.as_deref())),
        Command::Page { out, symbol, filter } => {
            let options = PageOptions {
                criteria: filter.criteria()?,
                symbol,
            };
            let mut query = dashboard.transaction_query();
            let html = render_page(&dashboard, &mut query, &options);
            match out {
                Some(path) => {
                    tokio::fs::write(&path, html).await?;
                    log::info!("Dashboard written to {}", path.display());
                }
                None => print!("{}", html),
            }
            Ok(())
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (config, from_file) = load_config(&args.config)?;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if from_file {
        log::info!("Config loaded from {}", args.config.display());
    } else {
        log::warn!("Config file {} not found, using defaults", args.config.display());
    }
    log::info!("Dataset: {}", config.dataset_path().display());

    let rt = Runtime::new().context("Failed to start runtime")?;
    let operation = format!("{:?}", args.command);

    if let Err(error) = rt.block_on(run(args.command, config)) {
        let context = ErrorContext::new(&operation);
        DefaultErrorLogger.log_error(&error, &context);
        return Err(error.into());
    }

    Ok(())
}
