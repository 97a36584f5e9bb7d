//! Session plumbing for CLI commands.

mod redirect;
pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result, bail};

use spotdesk_core::{BaseUrl, ClientConfig, RouteDecision, RouteGuard};
use spotdesk_http::DashboardApi;

pub use redirect::LoginRedirect;
pub use storage::FileStore;

/// Connect to the backend with the saved session restored.
pub async fn connect(base_url: &str) -> Result<DashboardApi> {
    let base_url = BaseUrl::new(base_url).context("Invalid base URL")?;
    let store = FileStore::from_env().context("Could not locate session file")?;

    let api = DashboardApi::connect(
        ClientConfig::new(base_url),
        Arc::new(store),
        Arc::new(LoginRedirect),
    )
    .context("Failed to build HTTP client")?;

    api.restore().await.context("Failed to load session")?;
    Ok(api)
}

/// Connect and check that the saved session may open `route`.
pub async fn connect_to(base_url: &str, route: &str) -> Result<DashboardApi> {
    let api = connect(base_url).await?;
    let session = api.provider().snapshot().await;

    match RouteGuard.check(route, session.as_ref()) {
        RouteDecision::Allow => Ok(api),
        RouteDecision::RedirectToLogin if session.is_some() => {
            bail!("This account cannot use the dashboard. Sign in with an admin or vendor account.")
        }
        RouteDecision::RedirectToLogin => bail!("No active session. Run 'spotdesk login' first."),
        RouteDecision::RedirectToDashboard => {
            bail!("Already signed in. Run 'spotdesk logout' first.")
        }
    }
}
