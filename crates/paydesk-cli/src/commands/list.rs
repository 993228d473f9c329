//! List records command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde_json::{Value, json};

use paydesk_core::browse::AmountInput;
use paydesk_core::{
    EntityFieldMap, EntityKind, FilterCriteria, Masker, PageRequest, PageResult, RawCriteria,
    Record, banks, fetch_or_empty,
};

use crate::config::Settings;
use crate::output::{self, Table};
use crate::source::{CliSource, fetch_failure};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Entity to list (banks, members, transfers, qr-payments)
    pub entity: EntityKind,

    /// Case-insensitive text to find in the searchable fields
    #[arg(long, short)]
    pub search: Option<String>,

    /// Status to match, or "all"
    #[arg(long)]
    pub status: Option<String>,

    /// Bank code to match, or "all"
    #[arg(long)]
    pub bank: Option<String>,

    /// First day to include (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Last day to include (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Minimum amount, inclusive
    #[arg(long)]
    pub min_amount: Option<String>,

    /// Maximum amount, inclusive
    #[arg(long)]
    pub max_amount: Option<String>,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Records per page (defaults to the configured page size)
    #[arg(long)]
    pub limit: Option<u32>,

    /// Print the page as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    /// The criteria in their form-field representation.
    fn raw_criteria(&self) -> RawCriteria {
        let mut raw = RawCriteria::default();
        if let Some(search) = &self.search {
            raw.search = search.clone();
        }
        if let Some(status) = &self.status {
            raw.status = status.clone();
        }
        if let Some(bank) = &self.bank {
            raw.bank = bank.clone();
        }
        raw.date_from = self.from.clone();
        raw.date_to = self.to.clone();
        raw.amount_min = self.min_amount.clone().map(AmountInput::Text);
        raw.amount_max = self.max_amount.clone().map(AmountInput::Text);
        raw
    }
}

pub async fn run(args: ListArgs, settings: &Settings) -> Result<()> {
    let criteria = FilterCriteria::try_from(args.raw_criteria()).context("Invalid filter")?;
    let request = PageRequest::new(args.page, args.limit.unwrap_or(settings.page_size))
        .context("Invalid page size")?;

    let source = CliSource::open(settings)?;
    let (records, error) = fetch_or_empty(&source, args.entity).await;
    if let Some(e) = error {
        output::error(&format!("{}: {}", fetch_failure(args.entity, &e), e));
    }

    let fields = settings.field_map(args.entity);
    let page = paydesk_core::apply(&records, &criteria, request, &fields);
    let masker = settings.masker();

    if args.json {
        return output::json(&masked_page(&page, &masker));
    }

    if page.is_empty() {
        eprintln!("{}", "No records found.".dimmed());
    } else {
        let table = record_table(&page.items, &fields);
        table.print(|column, cell| match column {
            2 => output::status(&cell).to_string(),
            _ => cell,
        });
    }

    eprintln!();
    eprintln!(
        "{}",
        format!(
            "Page {}/{} ({} records)",
            page.page, page.total_pages, page.total
        )
        .dimmed()
    );
    if page.has_previous() {
        eprintln!("{}: --page {}", "Previous page".dimmed(), page.page - 1);
    }
    if page.has_next() {
        eprintln!("{}: --page {}", "Next page".dimmed(), page.page + 1);
    }

    Ok(())
}

/// The page with every record masked, in the `PageResult` JSON shape.
fn masked_page(page: &PageResult<'_>, masker: &Masker) -> Value {
    let items: Vec<Value> = page
        .items
        .iter()
        .map(|record| masker.mask(&record.to_value()))
        .collect();

    json!({
        "items": items,
        "page": page.page,
        "totalPages": page.total_pages,
        "total": page.total,
    })
}

fn record_table(records: &[&Record], fields: &EntityFieldMap) -> Table {
    let mut table = Table::new(vec!["ID", "CREATED", "STATUS", "BANK", "AMOUNT"]);
    let dash = || "-".to_string();

    for record in records {
        let amount = match fields.amount {
            Some(_) => format!("{:.2}", fields.amount_of(record)),
            None => dash(),
        };
        table.push(vec![
            fields.id_of(record).unwrap_or_else(dash),
            record.text(&fields.timestamp).unwrap_or_else(dash),
            fields.status_of(record).unwrap_or_else(dash),
            fields
                .bank_of(record)
                .map(|code| banks::display_name(&code))
                .unwrap_or_else(dash),
            amount,
        ]);
    }
    table
}
