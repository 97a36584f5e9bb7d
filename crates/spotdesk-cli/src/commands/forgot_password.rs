//! Forgot password command implementation.

use anyhow::{Result, bail};
use clap::Args;

use super::change_password::non_empty_or;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct ForgotPasswordArgs {
    /// Account email to send the reset code to
    #[arg(long)]
    pub email: String,
}

pub async fn run(args: ForgotPasswordArgs, base_url: &str) -> Result<()> {
    let email = args.email.trim();
    if email.is_empty() {
        bail!("Email is required.");
    }

    let api = session::connect(base_url).await?;
    let response = api
        .forgot_password(email)
        .await
        .map_err(output::api_error)?;

    output::success(non_empty_or(&response.message, "Reset code sent"));
    eprintln!("Next: spotdesk verify-otp --email {email} --otp <code>");
    Ok(())
}
