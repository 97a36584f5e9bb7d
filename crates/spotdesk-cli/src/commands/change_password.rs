//! Change password command implementation.

use anyhow::{Result, bail};
use clap::Args;

use crate::output;
use crate::session;

const SETTINGS_ROUTE: &str = "/settings";

#[derive(Args, Debug)]
pub struct ChangePasswordArgs {
    /// Current password
    #[arg(long)]
    pub old: String,

    /// New password
    #[arg(long)]
    pub new: String,
}

pub async fn run(args: ChangePasswordArgs, base_url: &str) -> Result<()> {
    if args.old == args.new {
        bail!("The new password must differ from the current one.");
    }

    let api = session::connect_to(base_url, SETTINGS_ROUTE).await?;
    let response = api
        .change_password(&args.old, &args.new)
        .await
        .map_err(output::api_error)?;

    output::success(non_empty_or(&response.message, "Password changed"));
    Ok(())
}

pub(crate) fn non_empty_or<'a>(message: &'a str, fallback: &'a str) -> &'a str {
    if message.trim().is_empty() {
        fallback
    } else {
        message
    }
}
