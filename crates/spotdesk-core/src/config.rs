//! Client configuration.

use chrono::Duration;

use crate::types::BaseUrl;

/// Settings shared by the HTTP client and the session provider.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, e.g. `https://api.example.com/api/v1`.
    pub base_url: BaseUrl,
    /// How long before `expires_at` the provider refreshes proactively.
    pub refresh_skew: Duration,
    /// Lifetime assumed for access tokens whose expiry cannot be decoded.
    pub fallback_token_lifetime: Duration,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: BaseUrl) -> Self {
        Self {
            base_url,
            ..Self::default()
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BaseUrl::default(),
            refresh_skew: Duration::seconds(30),
            fallback_token_lifetime: Duration::minutes(30),
            user_agent: concat!("spotdesk/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
