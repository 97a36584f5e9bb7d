//! Authenticated HTTP client.
//!
//! Every request passes through two steps:
//!
//! 1. **Authorize**: the current session is read through the
//!    [`RefreshCoordinator`] and its access token attached as a bearer
//!    header. A session already marked failed never reaches the network.
//! 2. **Recover**: a 401 that means "token expired" triggers one coalesced
//!    refresh and one resend of the same request. Anything else, including a
//!    second expiry after the resend, is returned to the caller unchanged.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use spotdesk_core::error::AuthError;
use spotdesk_core::{AccessToken, Error, Result};

use crate::coordinator::RefreshCoordinator;
use crate::request::ApiRequest;
use crate::sign_out::ForcedSignOut;
use crate::transport::ApiTransport;

/// How many times one request may be resent after a token refresh.
pub const MAX_RECOVERY_ATTEMPTS: u32 = 1;

/// HTTP client that attaches session tokens and recovers from expiry.
///
/// Cheap to clone; clones share the coordinator and forced sign-out.
#[derive(Debug, Clone)]
pub struct AuthenticatedHttpClient {
    transport: ApiTransport,
    coordinator: Arc<RefreshCoordinator>,
    sign_out: Arc<ForcedSignOut>,
}

impl AuthenticatedHttpClient {
    pub fn new(
        transport: ApiTransport,
        coordinator: Arc<RefreshCoordinator>,
        sign_out: Arc<ForcedSignOut>,
    ) -> Self {
        Self {
            transport,
            coordinator,
            sign_out,
        }
    }

    pub fn transport(&self) -> &ApiTransport {
        &self.transport
    }

    pub fn coordinator(&self) -> &Arc<RefreshCoordinator> {
        &self.coordinator
    }

    pub fn sign_out(&self) -> &Arc<ForcedSignOut> {
        &self.sign_out
    }

    /// Send `request` with the session's token, recovering once from expiry.
    #[instrument(skip(self, request), fields(method = %request.method(), path = request.path()))]
    pub async fn send<R>(&self, request: &ApiRequest) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let epoch = self.sign_out.epoch();
        let mut token = self.authorize(epoch).await?;
        let mut attempt = 0;

        loop {
            match self.transport.send(request, token.as_ref()).await {
                Ok(body) => return Ok(body),
                Err(err) if self.should_recover(request, &err, attempt) => {
                    attempt += 1;
                    token = Some(self.recover(epoch, token.as_ref(), err).await?);
                    debug!(attempt, "Resending request with refreshed token");
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Read the session and pick the token to attach.
    async fn authorize(&self, epoch: u64) -> Result<Option<AccessToken>> {
        let session = self.coordinator.current().await?;

        if session.has_failed() {
            warn!("Session refresh previously failed; refusing to send request");
            self.sign_out.force(epoch).await;
            return Err(AuthError::SessionExpired.into());
        }

        Ok(session.access_token)
    }

    fn should_recover(&self, request: &ApiRequest, err: &Error, attempt: u32) -> bool {
        attempt < MAX_RECOVERY_ATTEMPTS && err.is_token_expired() && !request.is_auth_endpoint()
    }

    /// Obtain a fresh token after `rejected` was refused.
    ///
    /// On any failure the session is signed out and the triggering error is
    /// returned.
    async fn recover(
        &self,
        epoch: u64,
        rejected: Option<&AccessToken>,
        trigger: Error,
    ) -> Result<AccessToken> {
        info!(error = %trigger, "Access token rejected as expired");

        match self.coordinator.refresh(rejected).await {
            Ok(session) => match session.usable_access_token() {
                Some(token) => Ok(token.clone()),
                None => {
                    warn!("Session could not be refreshed");
                    self.sign_out.force(epoch).await;
                    Err(trigger)
                }
            },
            Err(e) => {
                warn!(error = %e, "Session refresh errored");
                self.sign_out.force(epoch).await;
                Err(trigger)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeProvider, RecordingNavigator};
    use serde_json::{Value, json};
    use spotdesk_core::{BaseUrl, ClientConfig};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Harness {
        client: AuthenticatedHttpClient,
        provider: FakeProvider,
        navigator: RecordingNavigator,
    }

    fn harness(server: &MockServer, provider: FakeProvider) -> Harness {
        let base = BaseUrl::new(format!("http://127.0.0.1:{}", server.address().port())).unwrap();
        let transport = ApiTransport::new(&ClientConfig::new(base)).unwrap();
        let navigator = RecordingNavigator::default();
        let coordinator = Arc::new(RefreshCoordinator::new(provider.shared()));
        let sign_out = Arc::new(ForcedSignOut::new(provider.shared(), navigator.shared()));
        Harness {
            client: AuthenticatedHttpClient::new(transport, coordinator, sign_out),
            provider,
            navigator,
        }
    }

    fn unauthorized(message: &str) -> ResponseTemplate {
        ResponseTemplate::new(401).set_body_json(json!({"success": false, "message": message}))
    }

    fn ok() -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({"success": true, "message": "ok", "data": 1}))
    }

    #[tokio::test]
    async fn attaches_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/profile"))
            .and(header("authorization", "Bearer A1"))
            .respond_with(ok())
            .expect(1)
            .mount(&server)
            .await;

        let h = harness(&server, FakeProvider::with_token("A1"));
        let body: Value = h.client.send(&ApiRequest::get("/user/profile")).await.unwrap();
        assert_eq!(body["data"], 1);
    }

    #[tokio::test]
    async fn jwt_expired_is_retried_once_with_new_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/users"))
            .and(header("authorization", "Bearer A1"))
            .respond_with(unauthorized("jwt expired"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/admin/users"))
            .and(header("authorization", "Bearer A2"))
            .respond_with(ok())
            .expect(1)
            .mount(&server)
            .await;

        let h = harness(&server, FakeProvider::with_token("A1").refreshing_to("A2"));
        let body: Value = h.client.send(&ApiRequest::get("/admin/users")).await.unwrap();

        assert_eq!(body["success"], true);
        assert_eq!(h.provider.refresh_calls(), 1);
    }

    #[tokio::test]
    async fn other_unauthorized_responses_are_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/users"))
            .respond_with(unauthorized("invalid credentials"))
            .expect(1)
            .mount(&server)
            .await;

        let h = harness(&server, FakeProvider::with_token("A1").refreshing_to("A2"));
        let err = h
            .client
            .send::<Value>(&ApiRequest::get("/admin/users"))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert_eq!(err.user_message(), "invalid credentials");
        assert_eq!(h.provider.refresh_calls(), 0);
        assert_eq!(h.navigator.redirects(), 0);
    }

    #[tokio::test]
    async fn second_expiry_after_retry_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/dashboard-overview"))
            .respond_with(unauthorized("Invalid or expired token"))
            .expect(2)
            .mount(&server)
            .await;

        let h = harness(&server, FakeProvider::with_token("A1").refreshing_to("A2"));
        let err = h
            .client
            .send::<Value>(&ApiRequest::get("/admin/dashboard-overview"))
            .await
            .unwrap_err();

        assert!(err.is_token_expired());
        assert_eq!(h.provider.refresh_calls(), 1);
        assert_eq!(h.navigator.redirects(), 0);
    }

    #[tokio::test]
    async fn auth_endpoints_are_never_recovered() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh-token"))
            .respond_with(unauthorized("jwt expired"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(unauthorized("token not found"))
            .expect(1)
            .mount(&server)
            .await;

        let h = harness(&server, FakeProvider::with_token("A1").refreshing_to("A2"));
        for endpoint in ["/auth/refresh-token", "/auth/login"] {
            let err = h
                .client
                .send::<Value>(&ApiRequest::post(endpoint))
                .await
                .unwrap_err();
            assert!(err.is_token_expired());
        }
        assert_eq!(h.provider.refresh_calls(), 0);
    }

    #[tokio::test]
    async fn failed_session_never_reaches_the_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ok())
            .expect(0)
            .mount(&server)
            .await;

        let h = harness(&server, FakeProvider::with_token("A1").mark_failed());
        let err = h
            .client
            .send::<Value>(&ApiRequest::get("/user/profile"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Auth(AuthError::SessionExpired)));
        assert_eq!(h.provider.sign_out_calls(), 1);
        assert_eq!(h.navigator.redirects(), 1);
    }

    #[tokio::test]
    async fn missing_refresh_token_signs_out_with_original_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/profile"))
            .respond_with(unauthorized("token not found"))
            .expect(1)
            .mount(&server)
            .await;

        let h = harness(
            &server,
            FakeProvider::with_token("A1").without_refresh_token(),
        );
        let err = h
            .client
            .send::<Value>(&ApiRequest::get("/user/profile"))
            .await
            .unwrap_err();

        assert!(err.is_token_expired());
        assert_eq!(h.provider.sign_out_calls(), 1);
        assert_eq!(h.navigator.redirects(), 1);
    }

    #[tokio::test]
    async fn ordinary_failures_pass_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/users"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(json!({"message": "Forbidden"})),
            )
            .mount(&server)
            .await;

        let h = harness(&server, FakeProvider::with_token("A1"));
        let err = h
            .client
            .send::<Value>(&ApiRequest::get("/admin/users"))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(403));
        assert_eq!(h.provider.refresh_calls(), 0);
        assert_eq!(h.provider.sign_out_calls(), 0);
    }
}
