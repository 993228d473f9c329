//! Export record command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use paydesk_core::{EntityKind, export};

use crate::config::Settings;
use crate::output;
use crate::source::{CliSource, find_record};

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Entity of the record (banks, members, transfers, qr-payments)
    pub entity: EntityKind,

    /// Value of the record's id field
    pub id: String,

    /// Directory to write into
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
}

pub async fn run(args: ExportArgs, settings: &Settings) -> Result<()> {
    let source = CliSource::open(settings)?;
    let record = find_record(&source, settings, args.entity, &args.id).await?;

    let masked = settings.masker().mask(&record.to_value());
    let path = export::write_export(&args.out, args.entity, &args.id, &masked)
        .with_context(|| format!("Failed to write export to {}", args.out.display()))?;

    output::success(&format!("Exported {} {} to {}", args.entity, args.id, path.display()));

    Ok(())
}
