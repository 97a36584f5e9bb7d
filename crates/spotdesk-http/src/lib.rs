//! spotdesk-http - authenticated HTTP client for the spotdesk backend.
//!
//! Requests go through [`AuthenticatedHttpClient`], which attaches the
//! session's bearer token and recovers once from an expired token by way of a
//! single coalesced refresh. Sessions that cannot be recovered end in a
//! [`ForcedSignOut`].

mod api;
mod client;
mod coordinator;
pub mod endpoints;
mod jwt;
mod provider;
mod request;
mod sign_out;
mod store;
mod transport;

#[cfg(test)]
mod testing;

pub use api::DashboardApi;
pub use client::{AuthenticatedHttpClient, MAX_RECOVERY_ATTEMPTS};
pub use coordinator::{PendingKind, RefreshCoordinator};
pub use jwt::token_expiry;
pub use provider::HttpSessionProvider;
pub use request::{ApiRequest, FormField, RequestBody};
pub use sign_out::ForcedSignOut;
pub use store::MemoryStore;
pub use transport::ApiTransport;
