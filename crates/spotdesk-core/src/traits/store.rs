//! Session persistence trait.

use async_trait::async_trait;

use crate::{Result, Session};

/// Somewhere a session survives between runs.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Load the persisted session, if any.
    async fn load(&self) -> Result<Option<Session>>;

    /// Persist `session`, replacing whatever was stored.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Remove the persisted session. Clearing an empty store is not an error.
    async fn clear(&self) -> Result<()>;
}
