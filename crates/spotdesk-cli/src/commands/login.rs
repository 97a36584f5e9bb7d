//! Login command implementation.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;

use spotdesk_core::guard::DASHBOARD_ROUTE;
use spotdesk_core::{Credentials, RouteDecision, RouteGuard, SessionProvider};

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "SPOTDESK_PASSWORD", hide_env_values = true)]
    pub password: String,
}

pub async fn run(args: LoginArgs, base_url: &str) -> Result<()> {
    let api = session::connect(base_url).await?;
    let credentials = Credentials::new(args.email.trim(), args.password);

    if credentials.is_incomplete() {
        bail!("Email and password are required.");
    }

    eprintln!("{}", "Logging in...".dimmed());

    let session = api.sign_in(&credentials).await.map_err(output::api_error)?;

    // Only admins and vendors may use the dashboard.
    if RouteGuard.check(DASHBOARD_ROUTE, Some(&session)) != RouteDecision::Allow {
        api.provider().sign_out().await.map_err(output::api_error)?;
        bail!(
            "Accounts with role '{}' cannot use the dashboard.",
            session.user.role.label()
        );
    }

    output::success("Logged in successfully");
    println!();
    output::field("Name", &session.user.name);
    output::field("Email", &session.user.email);
    output::field("Role", session.user.role.label());

    Ok(())
}
