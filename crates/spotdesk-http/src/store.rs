//! In-memory session store.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use spotdesk_core::{Result, Session, SessionStore};

/// Keeps the session in process memory only.
///
/// Used when nothing should outlive the process, and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Option<Session>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `session`.
    pub fn with_session(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(session))),
        }
    }

    /// Returns the stored session.
    pub async fn get(&self) -> Option<Session> {
        self.inner.lock().await.clone()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn load(&self) -> Result<Option<Session>> {
        Ok(self.inner.lock().await.clone())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        *self.inner.lock().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.inner.lock().await = None;
        Ok(())
    }
}
