//! Forced sign-out.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use spotdesk_core::{Navigator, SessionProvider};

/// Ends an unrecoverable session and sends the user to login.
///
/// Many requests can discover the same dead session at once. Each request
/// remembers the [`epoch`](Self::epoch) it started in; only the first
/// [`force`](Self::force) for an epoch signs out; later calls carrying that
/// epoch return immediately. A session loaded afterwards lives in the next
/// epoch and can be signed out again.
pub struct ForcedSignOut {
    provider: Arc<dyn SessionProvider>,
    navigator: Arc<dyn Navigator>,
    gate: Mutex<()>,
    epoch: AtomicU64,
}

impl ForcedSignOut {
    pub fn new(provider: Arc<dyn SessionProvider>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            provider,
            navigator,
            gate: Mutex::new(()),
            epoch: AtomicU64::new(0),
        }
    }

    /// Number of forced sign-outs so far.
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    /// Sign out and redirect on behalf of a request that started in
    /// `observed`. Returns false if that epoch was already ended.
    pub async fn force(&self, observed: u64) -> bool {
        let _gate = self.gate.lock().await;

        if self.epoch() != observed {
            debug!(observed, current = self.epoch(), "Session already signed out");
            return false;
        }

        info!("Forcing sign-out");

        if let Err(e) = self.provider.sign_out().await {
            // The redirect still happens: the session is unusable either way.
            warn!(error = %e, "Failed to clear session during sign-out");
        }

        self.navigator.redirect_to_login();
        self.epoch.fetch_add(1, Ordering::AcqRel);
        true
    }
}

impl std::fmt::Debug for ForcedSignOut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForcedSignOut")
            .field("epoch", &self.epoch())
            .finish()
    }
}
