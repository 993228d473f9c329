//! Snapshot command implementation.
//!
//! Copies every collection of the configured source into a directory that
//! can later be browsed offline as a `file://` source.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use paydesk_core::{EntityKind, RecordSource};
use paydesk_file::{SnapshotMeta, SnapshotStore};

use crate::config::Settings;
use crate::output;
use crate::source::{CliSource, fetch_failure};

#[derive(Args, Debug)]
pub struct SnapshotArgs {
    /// Directory to write the snapshot into
    #[arg(long)]
    pub out: PathBuf,

    /// Entities to include (defaults to all)
    #[arg(long = "entity", value_name = "ENTITY")]
    pub entities: Vec<EntityKind>,
}

pub async fn run(args: SnapshotArgs, settings: &Settings) -> Result<()> {
    let source = CliSource::open(settings)?;
    let store = SnapshotStore::new(&args.out);
    let mut kinds = if args.entities.is_empty() {
        EntityKind::ALL.to_vec()
    } else {
        args.entities.clone()
    };
    kinds.sort();
    kinds.dedup();

    let mut meta = SnapshotMeta::now(source.url().to_string());
    for kind in kinds {
        let records = source.fetch_all(kind).await.map_err(|e| {
            let context = fetch_failure(kind, &e);
            anyhow::Error::new(e).context(context)
        })?;

        let path = store
            .write(kind, &records)
            .await
            .with_context(|| format!("Failed to write {}", kind.segment()))?;

        tracing::info!(entity = %kind, count = records.len(), path = %path.display(), "Saved collection");
        output::field(kind.segment(), &records.len().to_string());
        meta.counts.insert(kind.segment().to_string(), records.len());
    }

    store
        .write_meta(&meta)
        .await
        .context("Failed to write snapshot metadata")?;

    output::success(&format!("Snapshot written to {}", store.root().display()));

    Ok(())
}
