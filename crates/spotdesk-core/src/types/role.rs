//! Account role type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Roles allowed into the dashboard.
const DASHBOARD_ROLES: &[&str] = &["admin", "vendor"];

/// An account role as reported by the backend (`admin`, `fisherman`,
/// `spotOwner`, ...).
///
/// Unknown roles are kept verbatim rather than rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    pub fn new(role: impl Into<String>) -> Self {
        Self(role.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this role may use the dashboard.
    pub fn can_access_dashboard(&self) -> bool {
        let normalized = self.0.to_lowercase();
        DASHBOARD_ROLES.contains(&normalized.as_str())
    }

    /// A human-readable label for tables and profile output.
    pub fn label(&self) -> &str {
        match self.0.as_str() {
            "" => "-",
            "spotOwner" => "Spot Owner",
            "fisherman" => "Fisherman",
            "admin" => "Admin",
            other => other,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<&str> for Role {
    fn from(role: &str) -> Self {
        Self::new(role)
    }
}
