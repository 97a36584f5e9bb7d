#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{Duration, Utc};
use serde_json::json;
use spotdesk_core::{
    AccessToken, BaseUrl, ClientConfig, Navigator, RefreshToken, Role, Session, SessionUser,
};
use spotdesk_http::{DashboardApi, MemoryStore};
use wiremock::{MockServer, ResponseTemplate};

/// Navigator that only counts redirects.
#[derive(Clone, Default)]
pub struct CountingNavigator(Arc<AtomicUsize>);

impl CountingNavigator {
    pub fn redirects(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl Navigator for CountingNavigator {
    fn redirect_to_login(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct Harness {
    pub api: DashboardApi,
    pub store: MemoryStore,
    pub navigator: CountingNavigator,
}

/// A signed-in admin session holding `access`.
pub fn session(access: &str, expires_in: Duration) -> Session {
    Session {
        user: SessionUser {
            id: "u1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role: Role::new("admin"),
        },
        access_token: Some(AccessToken::new(access)),
        refresh_token: Some(RefreshToken::new("R1")),
        expires_at: Some(Utc::now() + expires_in),
        error: None,
    }
}

/// Connect to `server` with `session` already restored.
pub async fn harness(server: &MockServer, session: Option<Session>) -> Harness {
    let base = BaseUrl::new(server.uri()).unwrap();
    let store = match session {
        Some(session) => MemoryStore::with_session(session),
        None => MemoryStore::new(),
    };
    let navigator = CountingNavigator::default();
    let api = DashboardApi::connect(
        ClientConfig::new(base),
        Arc::new(store.clone()),
        Arc::new(navigator.clone()),
    )
    .unwrap();
    api.restore().await.unwrap();

    Harness {
        api,
        store,
        navigator,
    }
}

pub fn unauthorized(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(401).set_body_json(json!({"success": false, "message": message}))
}

pub fn refreshed(access: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "message": "Token refreshed",
        "data": {"accessToken": access, "refreshToken": "R2"}
    }))
}

pub fn profile_body() -> serde_json::Value {
    json!({
        "success": true,
        "message": "Profile fetched",
        "data": {
            "_id": "u1",
            "fullName": "Ada Lovelace",
            "email": "ada@example.com",
            "role": "admin"
        }
    })
}
