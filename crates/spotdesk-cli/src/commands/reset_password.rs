//! Reset password command implementation.

use anyhow::{Result, bail};
use clap::Args;

use super::change_password::non_empty_or;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct ResetPasswordArgs {
    #[arg(long)]
    pub email: String,

    /// Verified code from the reset email
    #[arg(long)]
    pub otp: String,

    /// New password
    #[arg(long)]
    pub password: String,

    /// Repeat of the new password (defaults to --password)
    #[arg(long)]
    pub confirm_password: Option<String>,
}

pub async fn run(args: ResetPasswordArgs, base_url: &str) -> Result<()> {
    let confirm = args.confirm_password.as_deref().unwrap_or(&args.password);
    if confirm != args.password {
        bail!("Passwords do not match.");
    }

    let api = session::connect(base_url).await?;
    let response = api
        .reset_password(args.email.trim(), args.otp.trim(), &args.password, confirm)
        .await
        .map_err(output::api_error)?;

    output::success(non_empty_or(&response.message, "Password reset"));
    eprintln!("Next: spotdesk login --email {}", args.email.trim());
    Ok(())
}
