//! spotdesk-core - Core types and traits for the spotdesk dashboard client.

pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod guard;
pub mod session;
pub mod tokens;
pub mod traits;
pub mod types;

pub use config::ClientConfig;
pub use credentials::Credentials;
pub use error::Error;
pub use guard::{RouteDecision, RouteGuard};
pub use session::{Session, SessionError, SessionUser};
pub use tokens::{AccessToken, RefreshToken};
pub use traits::{Navigator, SessionProvider, SessionStore};
pub use types::{BaseUrl, Role};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
