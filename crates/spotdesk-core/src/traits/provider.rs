//! Session provider trait.

use async_trait::async_trait;

use crate::{Result, Session};

/// Owner of the current session.
///
/// A provider keeps its own session fresh (for example by refreshing shortly
/// before expiry) independently of any client. Clients never call these
/// methods directly; they go through a refresh coordinator so that
/// concurrent callers share one in-flight operation.
#[async_trait]
pub trait SessionProvider: Send + Sync + 'static {
    /// Returns the current session, refreshing it first if it is about to
    /// expire.
    ///
    /// A failed refresh is reported through [`Session::error`], not `Err`.
    async fn get_session(&self) -> Result<Session>;

    /// Exchanges the refresh token for a new access token unconditionally.
    ///
    /// Without a refresh token, the session is marked failed and no network
    /// call is made.
    async fn refresh_session(&self) -> Result<Session>;

    /// Destroys the session and any persisted copy of it.
    ///
    /// Does not navigate anywhere; that is the caller's job.
    async fn sign_out(&self) -> Result<()>;
}
