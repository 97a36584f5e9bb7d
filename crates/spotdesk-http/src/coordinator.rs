//! Coalescing of concurrent session fetches and refreshes.
//!
//! Any number of requests may need the session at the same moment. The
//! coordinator makes sure only one provider call is in flight: the first
//! caller starts it, everyone else awaits the same shared future. The slot is
//! emptied by the shared future itself, before it yields, so no waiter can
//! observe a settled outcome while the slot still points at it. Settled
//! outcomes are never handed to later callers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use futures_util::future::{BoxFuture, FutureExt, Shared};
use tracing::{debug, info};

use spotdesk_core::{AccessToken, Result, Session, SessionProvider};

type SharedOutcome = Shared<BoxFuture<'static, Result<Session>>>;
type Slot = Mutex<Option<Pending>>;

/// What the in-flight provider call is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingKind {
    /// `SessionProvider::get_session`.
    Fetch,
    /// `SessionProvider::refresh_session`.
    Refresh,
}

#[derive(Clone)]
struct Pending {
    id: u64,
    kind: PendingKind,
    outcome: SharedOutcome,
}

/// Process-wide owner of the single in-flight session operation.
pub struct RefreshCoordinator {
    provider: Arc<dyn SessionProvider>,
    slot: Arc<Slot>,
    next_id: AtomicU64,
}

impl RefreshCoordinator {
    pub fn new(provider: Arc<dyn SessionProvider>) -> Self {
        Self {
            provider,
            slot: Arc::new(Mutex::new(None)),
            next_id: AtomicU64::new(0),
        }
    }

    /// The provider this coordinator fronts.
    pub fn provider(&self) -> &Arc<dyn SessionProvider> {
        &self.provider
    }

    /// The kind of operation currently in flight, if any.
    pub fn pending(&self) -> Option<PendingKind> {
        lock(&self.slot).as_ref().map(|p| p.kind)
    }

    /// The current session.
    ///
    /// Joins whatever operation is in flight, so a request issued during a
    /// refresh gets the refreshed token rather than the one being replaced.
    pub async fn current(&self) -> Result<Session> {
        let pending = self.attach_or_start(PendingKind::Fetch);
        pending.outcome.await
    }

    /// A session whose access token is not `rejected`.
    ///
    /// If another request already rotated the token, that session is returned
    /// without a second refresh. Otherwise exactly one refresh is started (or
    /// joined) on behalf of every caller holding the same rejected token. A
    /// pending fetch is joined at most once; after that a refresh takes over
    /// the slot.
    /// A failed session is returned as-is for the caller to act on.
    pub async fn refresh(&self, rejected: Option<&AccessToken>) -> Result<Session> {
        let mut confirmed_stale = rejected.is_none();

        loop {
            let kind = if confirmed_stale {
                PendingKind::Refresh
            } else {
                PendingKind::Fetch
            };
            let pending = self.attach_or_start(kind);
            let session = pending.outcome.await?;

            let still_stale = rejected.is_some_and(|token| session.still_uses(token));
            if pending.kind == PendingKind::Refresh || session.has_failed() || !still_stale {
                return Ok(session);
            }

            // A plain fetch handed back the token the server just rejected.
            confirmed_stale = true;
        }
    }

    fn attach_or_start(&self, kind: PendingKind) -> Pending {
        let mut slot = lock(&self.slot);

        // A refresh never waits on a plain fetch: fetches may keep arriving
        // and handing back the rejected token.
        if let Some(pending) = slot.as_ref()
            && (kind == PendingKind::Fetch || pending.kind == PendingKind::Refresh)
        {
            debug!(pending = ?pending.kind, wanted = ?kind, "Joining in-flight session operation");
            return pending.clone();
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let provider = Arc::clone(&self.provider);
        let holder = Arc::downgrade(&self.slot);

        if kind == PendingKind::Refresh {
            info!("Starting session refresh");
        } else {
            debug!("Starting session fetch");
        }

        let outcome = async move {
            let result = match kind {
                PendingKind::Fetch => provider.get_session().await,
                PendingKind::Refresh => provider.refresh_session().await,
            };
            release(&holder, id);
            result
        }
        .boxed()
        .shared();

        let pending = Pending { id, kind, outcome };
        *slot = Some(pending.clone());
        pending
    }
}

impl std::fmt::Debug for RefreshCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshCoordinator")
            .field("pending", &self.pending())
            .finish()
    }
}

/// Empty the slot if it still holds operation `id`.
fn release(holder: &Weak<Slot>, id: u64) {
    if let Some(slot) = holder.upgrade() {
        let mut slot = lock(&slot);
        if slot.as_ref().is_some_and(|p| p.id == id) {
            *slot = None;
        }
    }
}

fn lock(slot: &Slot) -> std::sync::MutexGuard<'_, Option<Pending>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
