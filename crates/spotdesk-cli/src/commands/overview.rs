//! Dashboard overview command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use spotdesk_core::guard::DASHBOARD_ROUTE;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct OverviewArgs {
    /// Print the raw response as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: OverviewArgs, base_url: &str) -> Result<()> {
    let api = session::connect_to(base_url, DASHBOARD_ROUTE).await?;
    let response = api.dashboard_overview().await.map_err(output::api_error)?;

    if args.json {
        return output::json_pretty(&response.data);
    }

    let overview = response.data;
    let metrics = &overview.metrics;

    output::field("Fishermen", &metrics.total_fisherman.to_string());
    output::field("Spot owners", &metrics.total_spot_owner.to_string());
    output::field("Running events", &metrics.total_running_events.to_string());
    output::field("Total earnings", &output::money(metrics.total_earnings));
    output::field(
        "Commission rate",
        &format!("{}%", (metrics.commission_rate * 100.0).round()),
    );

    if !overview.sales_report.is_empty() {
        output::heading("Sales");
        for point in &overview.sales_report {
            println!("  {:<10} {}", point.month, output::money(point.total));
        }
    }

    if overview.recent_users.is_empty() {
        eprintln!();
        eprintln!("{}", "No recent users.".dimmed());
    } else {
        output::heading("Recent users");
        for user in &overview.recent_users {
            println!(
                "  {:<24} {:<28} {:<12} {}",
                user.full_name,
                user.email,
                user.role.label(),
                output::date(&user.join_date)
            );
        }
    }

    Ok(())
}
