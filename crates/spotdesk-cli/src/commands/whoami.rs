//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs, base_url: &str) -> Result<()> {
    let api = session::connect(base_url).await?;
    let session = api
        .provider()
        .snapshot()
        .await
        .context("No active session. Run 'spotdesk login' first.")?;

    output::field("Name", &session.user.name);
    output::field("Email", &session.user.email);
    output::field("Role", session.user.role.label());
    output::field("API", api.client().transport().base_url().as_str());

    if let Some(expires_at) = session.expires_at {
        output::field("Token expires", &expires_at.to_rfc3339());
    }
    if session.has_failed() {
        eprintln!("{}", "Session can no longer be refreshed.".yellow());
    }

    Ok(())
}
