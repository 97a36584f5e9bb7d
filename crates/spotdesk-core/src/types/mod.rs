//! Validated value types shared across the workspace.

mod base_url;
mod role;

pub use base_url::{BaseUrl, DEFAULT_BASE_URL};
pub use role::Role;
