//! Backend-backed session provider.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use spotdesk_core::api::{ApiResponse, LoginResponseData, RefreshResponseData};
use spotdesk_core::error::AuthError;
use spotdesk_core::{
    AccessToken, ClientConfig, Credentials, RefreshToken, Result, Session, SessionError,
    SessionProvider, SessionStore, SessionUser,
};

use crate::endpoints::{LOGIN, LoginRequest, REFRESH_TOKEN, RefreshTokenRequest};
use crate::jwt::token_expiry;
use crate::request::ApiRequest;
use crate::transport::ApiTransport;

/// Session provider that signs in and refreshes against the backend.
///
/// Cheap to clone (internal `Arc`). Every change to the session is written
/// through to the configured [`SessionStore`].
#[derive(Clone)]
pub struct HttpSessionProvider {
    inner: Arc<ProviderInner>,
}

struct ProviderInner {
    transport: ApiTransport,
    config: ClientConfig,
    store: Arc<dyn SessionStore>,
    session: RwLock<Option<Session>>,
}

impl HttpSessionProvider {
    pub fn new(transport: ApiTransport, config: ClientConfig, store: Arc<dyn SessionStore>) -> Self {
        Self {
            inner: Arc::new(ProviderInner {
                transport,
                config,
                store,
                session: RwLock::new(None),
            }),
        }
    }

    /// Load the persisted session, replacing whatever is in memory.
    #[instrument(skip(self))]
    pub async fn restore(&self) -> Result<Option<Session>> {
        let stored = self.inner.store.load().await?;
        debug!(found = stored.is_some(), "Restored session");
        *self.inner.session.write().await = stored.clone();
        Ok(stored)
    }

    /// Authenticate and create a new session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if the backend answers without
    /// a token, or the backend's error if it rejects the request outright.
    #[instrument(skip(self, credentials), fields(email = %credentials.email()))]
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session> {
        if credentials.is_incomplete() {
            return Err(AuthError::InvalidCredentials.into());
        }

        info!("Signing in");

        let response = login(&self.inner.transport, credentials).await?;
        if !response.success || response.data.access_token.is_empty() {
            return Err(AuthError::InvalidCredentials.into());
        }

        let data = response.data;
        let session = Session {
            user: SessionUser {
                id: data.id,
                name: data.name,
                email: data.email,
                role: data.role,
            },
            expires_at: Some(self.expiry_of(&data.access_token)),
            access_token: Some(AccessToken::new(data.access_token)),
            refresh_token: Some(RefreshToken::new(data.refresh_token)),
            error: None,
        };

        self.inner.store.save(&session).await?;
        *self.inner.session.write().await = Some(session.clone());

        debug!(user = %session.user.id, "Signed in");
        Ok(session)
    }

    /// The in-memory session without any refresh.
    pub async fn snapshot(&self) -> Option<Session> {
        self.inner.session.read().await.clone()
    }

    fn expiry_of(&self, access_token: &str) -> DateTime<Utc> {
        token_expiry(access_token)
            .unwrap_or_else(|| Utc::now() + self.inner.config.fallback_token_lifetime)
    }

    fn is_due(&self, session: &Session) -> bool {
        !session.has_failed()
            && session.refresh_token.is_some()
            && session.expires_within(self.inner.config.refresh_skew, Utc::now())
    }

    /// Exchange the session's refresh token, updating `session` in place.
    ///
    /// Failure is recorded on the session rather than returned.
    async fn exchange(&self, session: &mut Session) {
        let Some(refresh_token) = session.refresh_token.clone() else {
            warn!("No refresh token; marking session failed");
            session.error = Some(SessionError::RefreshFailed);
            return;
        };

        match refresh(&self.inner.transport, &refresh_token).await {
            Ok(response) if response.success && !response.data.access_token.is_empty() => {
                let data = response.data;
                session.expires_at = Some(self.expiry_of(&data.access_token));
                session.access_token = Some(AccessToken::new(data.access_token));
                session.refresh_token = Some(RefreshToken::new(data.refresh_token));
                session.error = None;
                info!("Session refreshed");
            }
            Ok(_) => {
                warn!("Refresh response carried no token");
                session.error = Some(SessionError::RefreshFailed);
            }
            Err(e) => {
                warn!(error = %e, "Session refresh failed");
                session.error = Some(SessionError::RefreshFailed);
            }
        }
    }

    async fn persist(&self, session: &Session) {
        if let Err(e) = self.inner.store.save(session).await {
            warn!(error = %e, "Failed to persist session");
        }
    }
}

#[async_trait]
impl SessionProvider for HttpSessionProvider {
    async fn get_session(&self) -> Result<Session> {
        {
            let guard = self.inner.session.read().await;
            let session = guard.as_ref().ok_or(AuthError::NotAuthenticated)?;
            if !self.is_due(session) {
                return Ok(session.clone());
            }
        }

        let mut guard = self.inner.session.write().await;
        let session = guard.as_mut().ok_or(AuthError::NotAuthenticated)?;

        // Someone else may have refreshed while we waited for the lock.
        if self.is_due(session) {
            debug!("Access token near expiry; refreshing");
            self.exchange(session).await;
            self.persist(session).await;
        }

        Ok(session.clone())
    }

    async fn refresh_session(&self) -> Result<Session> {
        let mut guard = self.inner.session.write().await;
        let session = guard.as_mut().ok_or(AuthError::NotAuthenticated)?;

        self.exchange(session).await;
        self.persist(session).await;

        Ok(session.clone())
    }

    async fn sign_out(&self) -> Result<()> {
        info!("Clearing session");
        *self.inner.session.write().await = None;
        self.inner.store.clear().await
    }
}

impl std::fmt::Debug for HttpSessionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSessionProvider")
            .field("base_url", self.inner.transport.base_url())
            .field("session", &"[REDACTED]")
            .finish()
    }
}

/// `POST /auth/login` without any session handling.
pub(crate) async fn login(
    transport: &ApiTransport,
    credentials: &Credentials,
) -> Result<ApiResponse<LoginResponseData>> {
    let request = ApiRequest::post(LOGIN).with_json(&LoginRequest {
        email: credentials.email(),
        password: credentials.password(),
    })?;
    transport.send(&request, None).await
}

/// `POST /auth/refresh-token` without any session handling.
pub(crate) async fn refresh(
    transport: &ApiTransport,
    refresh_token: &RefreshToken,
) -> Result<ApiResponse<RefreshResponseData>> {
    let request = ApiRequest::post(REFRESH_TOKEN).with_json(&RefreshTokenRequest {
        refresh_token: refresh_token.as_str(),
    })?;
    transport.send(&request, None).await
}
