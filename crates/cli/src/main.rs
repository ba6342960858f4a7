mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "lantern",
    about = "Lantern — multi-chain wallet portfolio engine.\nComputes per-chain and portfolio-wide token/fiat totals from feed snapshots.",
    version,
    propagate_version = true
)]
struct Cli {
    #[arg(long, short = 'o', global = true, default_value = "table")]
    output: CliOutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat { Table, Json, JsonPretty }

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> OutputFormat {
        match f {
            CliOutputFormat::Table => OutputFormat::Table,
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the chain registry.
    Chains {
        /// Load chains from a JSON file instead of the built-in set.
        #[arg(long)]
        registry: Option<PathBuf>,
    },

    /// Compute portfolio totals from a feed snapshot file.
    Portfolio {
        /// Snapshot JSON: balances, prices, and tracked addresses.
        snapshot: PathBuf,

        /// Tracked address (repeatable). Overrides the snapshot's set.
        #[arg(long = "address")]
        addresses: Vec<String>,

        /// Load chains from a JSON file instead of the built-in set.
        #[arg(long)]
        registry: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let fmt: OutputFormat = cli.output.into();

    match cli.command {
        Commands::Chains { registry } => commands::chains::run(registry.as_deref(), fmt),
        Commands::Portfolio { snapshot, addresses, registry } => {
            commands::portfolio::run(&snapshot, &addresses, registry.as_deref(), fmt)
        }
    }
}
