//! User list command implementation.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use spotdesk_core::api::{DEFAULT_PAGE_SIZE, DashboardUser, UserListQuery};

use crate::output;
use crate::session;

const USERS_ROUTE: &str = "/users";

#[derive(Args, Debug)]
pub struct UsersArgs {
    /// Filter by role (e.g. fisherman, spotOwner)
    #[arg(long)]
    pub role: Option<String>,

    /// Search by name or email
    #[arg(long)]
    pub search: Option<String>,

    /// Page number
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Rows per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub limit: u32,

    /// Skip booking and earnings statistics
    #[arg(long)]
    pub no_stats: bool,

    /// Print rows as JSON lines
    #[arg(long)]
    pub json: bool,
}

impl UsersArgs {
    fn query(&self) -> UserListQuery {
        UserListQuery {
            page: self.page,
            limit: self.limit,
            search: self.search.clone(),
            role: self.role.clone(),
            include_stats: !self.no_stats,
        }
    }
}

pub async fn run(args: UsersArgs, base_url: &str) -> Result<()> {
    let api = session::connect_to(base_url, USERS_ROUTE).await?;
    let query = args.query();
    let response = api.users(&query).await.map_err(output::api_error)?;
    let meta = response.page_meta(query.page, query.limit);

    if response.data.is_empty() {
        eprintln!("{}", "No users found.".dimmed());
        return Ok(());
    }

    for user in &response.data {
        if args.json {
            output::json(user)?;
        } else {
            print_row(user);
        }
    }

    output::page(&meta);
    Ok(())
}

fn print_row(user: &DashboardUser) {
    let mut stats = Vec::new();
    if let Some(bookings) = user.total_bookings {
        stats.push(format!("{bookings} bookings"));
    }
    if let Some(paid) = user.total_paid_amount {
        stats.push(format!("{} paid", output::money(paid)));
    }
    if let Some(events) = user.active_events {
        stats.push(format!("{events} active events"));
    }

    println!(
        "{:<24} {:<28} {:<12} {:<14} {:<13} {}",
        user.full_name,
        user.email,
        user.role.label(),
        output::or_dash(user.phone.as_deref()),
        output::date(&user.created_at),
        stats.join(", ").dimmed()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_map_onto_query() {
        let args = UsersArgs {
            role: Some("spotOwner".to_string()),
            search: None,
            page: 2,
            limit: 25,
            no_stats: true,
            json: false,
        };
        let query = args.query();
        assert_eq!(query.page, 2);
        assert_eq!(query.limit, 25);
        assert!(!query.include_stats);
        assert_eq!(query.role.as_deref(), Some("spotOwner"));
    }
}
