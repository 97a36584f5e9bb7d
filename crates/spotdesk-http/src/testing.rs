//! In-memory collaborators for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use spotdesk_core::error::AuthError;
use spotdesk_core::{
    AccessToken, Navigator, RefreshToken, Result, Session, SessionError, SessionProvider,
};

#[derive(Default)]
struct FakeState {
    session: Option<Session>,
    next_token: Option<String>,
    fail_refresh: bool,
    delay: Duration,
}

/// A provider whose behaviour is scripted by the test.
#[derive(Clone, Default)]
pub(crate) struct FakeProvider {
    state: Arc<Mutex<FakeState>>,
    fetch_calls: Arc<AtomicUsize>,
    refresh_calls: Arc<AtomicUsize>,
    sign_out_calls: Arc<AtomicUsize>,
}

impl FakeProvider {
    pub(crate) fn with_token(token: &str) -> Self {
        let provider = Self::default();
        provider.state.lock().unwrap().session = Some(Session {
            access_token: Some(AccessToken::new(token)),
            refresh_token: Some(RefreshToken::new("refresh")),
            ..Session::default()
        });
        provider
    }

    pub(crate) fn signed_out() -> Self {
        Self::default()
    }

    pub(crate) fn refreshing_to(self, token: &str) -> Self {
        self.state.lock().unwrap().next_token = Some(token.to_string());
        self
    }

    pub(crate) fn failing_refresh(self) -> Self {
        self.state.lock().unwrap().fail_refresh = true;
        self
    }

    pub(crate) fn with_delay_ms(self, ms: u64) -> Self {
        self.state.lock().unwrap().delay = Duration::from_millis(ms);
        self
    }

    pub(crate) fn without_refresh_token(self) -> Self {
        if let Some(session) = self.state.lock().unwrap().session.as_mut() {
            session.refresh_token = None;
        }
        self
    }

    pub(crate) fn mark_failed(self) -> Self {
        if let Some(session) = self.state.lock().unwrap().session.as_mut() {
            session.error = Some(SessionError::RefreshFailed);
        }
        self
    }

    pub(crate) fn shared(&self) -> Arc<dyn SessionProvider> {
        Arc::new(self.clone())
    }

    pub(crate) fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }

    fn delay(&self) -> Duration {
        self.state.lock().unwrap().delay
    }
}

#[async_trait]
impl SessionProvider for FakeProvider {
    async fn get_session(&self) -> Result<Session> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay()).await;
        self.state
            .lock()
            .unwrap()
            .session
            .clone()
            .ok_or_else(|| AuthError::NotAuthenticated.into())
    }

    async fn refresh_session(&self) -> Result<Session> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay()).await;

        let mut state = self.state.lock().unwrap();
        let fail = state.fail_refresh;
        let next = state.next_token.clone();
        let session = state
            .session
            .as_mut()
            .ok_or(AuthError::NotAuthenticated)?;

        match (fail, session.refresh_token.is_some(), next) {
            (false, true, Some(token)) => {
                session.access_token = Some(AccessToken::new(token));
                session.error = None;
            }
            _ => session.error = Some(SessionError::RefreshFailed),
        }
        Ok(session.clone())
    }

    async fn sign_out(&self) -> Result<()> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        self.state.lock().unwrap().session = None;
        Ok(())
    }
}

/// Counts redirects instead of navigating.
#[derive(Clone, Default)]
pub(crate) struct RecordingNavigator {
    redirects: Arc<AtomicUsize>,
}

impl RecordingNavigator {
    pub(crate) fn redirects(&self) -> usize {
        self.redirects.load(Ordering::SeqCst)
    }

    pub(crate) fn shared(&self) -> Arc<dyn Navigator> {
        Arc::new(self.clone())
    }
}

impl Navigator for RecordingNavigator {
    fn redirect_to_login(&self) {
        self.redirects.fetch_add(1, Ordering::SeqCst);
    }
}
