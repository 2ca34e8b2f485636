//! SERF - financial report engine CLI
//!
//! # Usage
//! ```bash
//! serf sales --country PERU --signature
//! serf periodic --year 2025 --quarter 4 --watermark --encrypt
//! serf --config serf.toml convert 1200 CNY
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use serf_cli::{commands, AppContext};
use serf_facade::SecurityFlags;

#[derive(Parser)]
#[command(name = "serf")]
#[command(author, version, about = "SERF - Financial report engine", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// Security layers applied to the generated report
#[derive(Args, Debug, Clone, Copy)]
struct SecurityArgs {
    /// Add a watermark
    #[arg(long)]
    watermark: bool,
    /// Sign the report
    #[arg(long)]
    signature: bool,
    /// Encode the final output
    #[arg(long)]
    encrypt: bool,
}

impl From<SecurityArgs> for SecurityFlags {
    fn from(args: SecurityArgs) -> Self {
        SecurityFlags {
            watermark: args.watermark,
            signature: args.signature,
            encryption: args.encrypt,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sales report for a country
    Sales {
        #[arg(long)]
        country: String,
        /// Limit to a month (requires --month)
        #[arg(long, requires = "month")]
        year: Option<i32>,
        #[arg(long, requires = "year")]
        month: Option<u32>,
        #[command(flatten)]
        security: SecurityArgs,
    },

    /// Inventory report for a country
    Inventory {
        #[arg(long)]
        country: String,
        #[command(flatten)]
        security: SecurityArgs,
    },

    /// Corporate report over all subsidiaries
    Consolidated {
        #[command(flatten)]
        security: SecurityArgs,
    },

    /// Monthly, quarterly or annual report
    Periodic {
        #[arg(long)]
        year: i32,
        #[arg(long, conflicts_with = "quarter")]
        month: Option<u32>,
        #[arg(long)]
        quarter: Option<u32>,
        #[command(flatten)]
        security: SecurityArgs,
    },

    /// Show a template configured for a country
    Template {
        /// Report kind (sales, inventory, consolidated, monthly, quarterly, annual)
        #[arg(long)]
        kind: String,
        #[arg(long)]
        country: String,
    },

    /// Convert an amount into the base currency
    Convert {
        amount: Decimal,
        currency: String,
    },

    /// Show the exchange rate table
    Rates,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let ctx = AppContext::new(cli.config.as_deref())
        .with_context(|| format!("Failed to initialize engine (config: {:?})", cli.config))?;

    tracing::debug!(command = ?cli.command, config = ?cli.config, "Dispatching command");

    let output = match cli.command {
        Commands::Sales {
            country,
            year,
            month,
            security,
        } => commands::sales(&ctx, &country, year, month, security.into())?,
        Commands::Inventory { country, security } => {
            commands::inventory(&ctx, &country, security.into())?
        }
        Commands::Consolidated { security } => commands::consolidated(&ctx, security.into())?,
        Commands::Periodic {
            year,
            month,
            quarter,
            security,
        } => commands::periodic(&ctx, year, month, quarter, security.into())?,
        Commands::Template { kind, country } => commands::template(&ctx, &kind, &country)?,
        Commands::Convert { amount, currency } => commands::convert(&ctx, amount, &currency)?,
        Commands::Rates => commands::rates(&ctx),
    };

    println!("{}", output);
    Ok(())
}
