//! edenctl - drive an Eden Creator contract persisted on disk

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "edenctl")]
#[command(about = "Eden Creator ledger and reward distribution tool")]
#[command(version, long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"))]
pub struct Cli {
    /// Contract configuration (TOML)
    #[arg(short, long, value_name = "FILE", default_value = "eden.toml")]
    pub config: PathBuf,

    /// Directory holding state snapshots
    #[arg(short, long, value_name = "DIR", default_value = "data")]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the standard configuration and an empty state
    Init {
        /// Overwrite an existing state snapshot
        #[arg(long)]
        force: bool,
    },

    /// Add an account to the directory
    Register {
        account: String,
    },

    /// Apply one action, or a JSON array of actions, from a file
    Apply {
        /// JSON file with the action(s)
        #[arg(short, long, value_name = "FILE")]
        action: PathBuf,

        /// Account that authorized the action (repeatable)
        #[arg(short, long = "signer", value_name = "ACCOUNT")]
        signers: Vec<String>,
    },

    /// Inspect the persisted state
    Show {
        #[command(subcommand)]
        what: ShowCommand,
    },
}

#[derive(Subcommand)]
pub enum ShowCommand {
    /// Whole state as JSON
    State,

    /// Balance of an account
    Balance {
        owner: String,
        /// Symbol such as "4,EOS"
        symbol: String,
    },

    /// Supply records of both symbols
    Supply,

    /// Current round and reward configuration
    Round,

    /// Votes of a round
    Votes {
        round: u64,
        #[arg(short, long)]
        group: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    commands::run(cli).await
}
