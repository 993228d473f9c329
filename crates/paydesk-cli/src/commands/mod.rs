//! Subcommand implementations.

pub mod banks;
pub mod config;
pub mod export;
pub mod list;
pub mod show;
pub mod snapshot;

use anyhow::Result;

use crate::cli::{Commands, GlobalArgs};
use crate::config::Settings;

pub async fn handle(command: Commands, global: &GlobalArgs) -> Result<()> {
    // The bank directory is static and needs no configuration.
    if let Commands::Banks(args) = command {
        return banks::run(args);
    }

    let settings = Settings::load(global)?;

    match command {
        Commands::List(args) => list::run(args, &settings).await,
        Commands::Show(args) => show::run(args, &settings).await,
        Commands::Export(args) => export::run(args, &settings).await,
        Commands::Config(args) => config::run(args, &settings),
        Commands::Snapshot(args) => snapshot::run(args, &settings).await,
        Commands::Banks(args) => banks::run(args),
    }
}
