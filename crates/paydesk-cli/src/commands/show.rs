//! Show record command implementation.

use anyhow::Result;
use clap::Args;

use paydesk_core::{EntityKind, banks, export};

use crate::config::Settings;
use crate::output;
use crate::source::{CliSource, find_record};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Entity of the record (banks, members, transfers, qr-payments)
    pub entity: EntityKind,

    /// Value of the record's id field
    pub id: String,

    /// Print only the masked JSON
    #[arg(long)]
    pub raw: bool,
}

pub async fn run(args: ShowArgs, settings: &Settings) -> Result<()> {
    let source = CliSource::open(settings)?;
    let record = find_record(&source, settings, args.entity, &args.id).await?;
    let fields = settings.field_map(args.entity);

    if !args.raw {
        output::field("Entity", args.entity.as_str());
        if let Some(id) = fields.id_of(&record) {
            output::field("ID", &id);
        }
        if let Some(status) = fields.status_of(&record) {
            output::field("Status", &output::status(&status).to_string());
        }
        if let Some(code) = fields.bank_of(&record) {
            output::field("Bank", &format!("{} ({})", banks::display_name(&code), code));
        }
        if let Some(created) = record.text(&fields.timestamp) {
            output::field("Created", &created);
        }
        if fields.amount.is_some() {
            output::field("Amount", &format!("{:.2}", fields.amount_of(&record)));
        }
        println!();
    }

    let masked = settings.masker().mask(&record.to_value());
    output::json_text(&export::to_pretty_json(&masked)?);

    Ok(())
}
