//! Seams between the HTTP client and its collaborators.

mod navigator;
mod provider;
mod store;

pub use navigator::Navigator;
pub use provider::SessionProvider;
pub use store::SessionStore;
