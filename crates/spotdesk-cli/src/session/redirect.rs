use colored::Colorize;

use spotdesk_core::Navigator;
use spotdesk_core::guard::LOGIN_ROUTE;

/// Tells the user to sign in again once the session is gone.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoginRedirect;

impl Navigator for LoginRedirect {
    fn redirect_to_login(&self) {
        tracing::debug!(route = LOGIN_ROUTE, "Redirecting to login");
        eprintln!(
            "{} {}",
            "Session expired.".yellow(),
            "Run 'spotdesk login' to sign in again.".dimmed()
        );
    }
}
