//! Logout command implementation.

use anyhow::Result;
use clap::Args;

use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, base_url: &str) -> Result<()> {
    let api = session::connect(base_url).await?;

    if api.provider().snapshot().await.is_none() {
        output::success("Not logged in");
        return Ok(());
    }

    api.logout().await.map_err(output::api_error)?;
    output::success("Logged out");

    Ok(())
}
