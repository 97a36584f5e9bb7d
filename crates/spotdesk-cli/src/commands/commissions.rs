//! Commission report command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use spotdesk_core::api::{CommissionQuery, DEFAULT_PAGE_SIZE};

use crate::output;
use crate::session;

const COMMISSION_ROUTE: &str = "/commission-report";

#[derive(Args, Debug)]
pub struct CommissionsArgs {
    /// Search by owner name or email
    #[arg(long)]
    pub search: Option<String>,

    /// Page number
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Rows per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub limit: u32,

    /// Print rows as JSON lines
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: CommissionsArgs, base_url: &str) -> Result<()> {
    let api = session::connect_to(base_url, COMMISSION_ROUTE).await?;
    let query = CommissionQuery {
        page: args.page,
        limit: args.limit,
        search: args.search,
    };
    let response = api
        .commission_report(&query)
        .await
        .map_err(output::api_error)?;

    if response.data.is_empty() {
        eprintln!("{}", "No commission data.".dimmed());
        return Ok(());
    }

    for row in &response.data {
        if args.json {
            output::json(row)?;
        } else {
            println!(
                "{:<24} {:<28} {:>4} events  {:>10} earned  {:>10} commission",
                row.owner_name,
                row.owner_email,
                row.total_events,
                output::money(row.total_earnings),
                output::money(row.platform_commission)
            );
        }
    }

    output::page(&response.page_meta(query.page, query.limit));
    Ok(())
}
