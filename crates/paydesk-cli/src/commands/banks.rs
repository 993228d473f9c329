//! Bank directory command implementation.

use anyhow::Result;
use clap::Args;

use paydesk_core::banks::BANKS;

use crate::output::{self, Table};

#[derive(Args, Debug)]
pub struct BanksArgs {
    /// Print the directory as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: BanksArgs) -> Result<()> {
    if args.json {
        return output::json(&BANKS);
    }

    let mut table = Table::new(vec!["CODE", "SHORT", "NAME"]);
    for bank in BANKS {
        table.push(vec![
            bank.code.to_string(),
            bank.short_name.to_string(),
            bank.name.to_string(),
        ]);
    }
    table.print(|_, cell| cell);

    Ok(())
}
