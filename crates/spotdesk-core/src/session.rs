//! The signed-in session as seen by API clients.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::types::Role;
use crate::{AccessToken, RefreshToken};

/// Why a session can no longer be used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionError {
    /// Exchanging the refresh token failed or no refresh token exists.
    RefreshFailed,
}

/// The account a session belongs to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// A snapshot of the current session.
///
/// Sessions are owned by a [`SessionProvider`](crate::traits::SessionProvider);
/// clients only ever read them. When [`error`](Self::error) is set, the access
/// token must be treated as unusable whether or not it is present.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
    pub access_token: Option<AccessToken>,
    pub refresh_token: Option<RefreshToken>,
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub error: Option<SessionError>,
}

impl Session {
    /// Returns true if the session was marked unrecoverable.
    pub fn has_failed(&self) -> bool {
        self.error.is_some()
    }

    /// The access token, unless the session has failed.
    pub fn usable_access_token(&self) -> Option<&AccessToken> {
        if self.has_failed() {
            None
        } else {
            self.access_token.as_ref()
        }
    }

    /// Returns true if the token is expired or will be within `skew`.
    ///
    /// A session without a known expiry is never considered due.
    pub fn expires_within(&self, skew: Duration, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| now >= at - skew)
    }

    /// Returns true if this session still carries `token` as its access token.
    pub fn still_uses(&self, token: &AccessToken) -> bool {
        self.access_token.as_ref() == Some(token)
    }
}
