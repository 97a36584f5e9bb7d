//! Route protection for dashboard views.

use crate::Session;

/// Pages reachable without a session.
const AUTH_PAGES: &[&str] = &["/login", "/forgot-password", "/verify-otp", "/reset-password"];

/// Where the user lands when entering the app signed in.
pub const DASHBOARD_ROUTE: &str = "/dashboard";

/// The unauthenticated entry point.
pub const LOGIN_ROUTE: &str = "/login";

/// Outcome of a route check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    RedirectToDashboard,
    RedirectToLogin,
}

/// Decides whether a view may be shown for the current session.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard;

impl RouteGuard {
    pub fn check(&self, path: &str, session: Option<&Session>) -> RouteDecision {
        if path.starts_with("/api") {
            return RouteDecision::Allow;
        }

        let is_auth_page = AUTH_PAGES.iter().any(|page| path.starts_with(page));
        let session = session.filter(|s| s.access_token.is_some());

        match (is_auth_page, session) {
            (true, Some(_)) => RouteDecision::RedirectToDashboard,
            (true, None) => RouteDecision::Allow,
            (false, None) => RouteDecision::RedirectToLogin,
            (false, Some(session)) if !session.user.role.can_access_dashboard() => {
                RouteDecision::RedirectToLogin
            }
            (false, Some(_)) => RouteDecision::Allow,
        }
    }
}
