//! OTP verification command implementation.

use anyhow::{Result, bail};
use clap::Args;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct VerifyOtpArgs {
    #[arg(long)]
    pub email: String,

    /// Code from the reset email
    #[arg(long)]
    pub otp: String,
}

pub async fn run(args: VerifyOtpArgs, base_url: &str) -> Result<()> {
    let otp = args.otp.trim();
    if otp.is_empty() {
        bail!("Verification code is required.");
    }

    let api = session::connect(base_url).await?;
    let response = api
        .verify_otp(args.email.trim(), otp)
        .await
        .map_err(output::api_error)?;

    output::success("Code verified");
    eprintln!(
        "Next: spotdesk reset-password --email {} --otp {otp} --password <new>",
        response.data.email
    );
    Ok(())
}
