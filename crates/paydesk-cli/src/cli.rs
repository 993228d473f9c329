//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands::{banks, config, export, list, show, snapshot};

/// Back-office browser for payment gateway records.
#[derive(Parser, Debug)]
#[command(name = "paydesk")]
#[command(author, version = env!("PAYDESK_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options that feed the resolved configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Record source: https:// gateway URL or file:// snapshot directory
    /// (defaults to PAYDESK_SOURCE, then the config file)
    #[arg(long, global = true)]
    pub source: Option<String>,

    /// API bearer token (defaults to PAYDESK_TOKEN, then the config file)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Path to the configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List records of an entity with filters and pagination
    List(list::ListArgs),

    /// Show a single record
    Show(show::ShowArgs),

    /// Export a single record as a JSON file
    Export(export::ExportArgs),

    /// Print the bank directory
    Banks(banks::BanksArgs),

    /// Print the resolved configuration
    Config(config::ConfigArgs),

    /// Save every collection of the source into a snapshot directory
    Snapshot(snapshot::SnapshotArgs),
}
