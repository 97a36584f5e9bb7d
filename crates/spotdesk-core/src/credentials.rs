//! Dashboard sign-in credentials.

use std::fmt;

/// What the login form collects: the account email and its password.
///
/// The password stays out of Debug output so a traced sign-in never leaks it.
///
/// ```
/// use spotdesk_core::Credentials;
///
/// let creds = Credentials::new("admin@example.com", "hunter2");
/// assert!(!creds.is_incomplete());
/// assert!(!format!("{creds:?}").contains("hunter2"));
/// ```
#[derive(Clone)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// A form with a blank email or an empty password is never sent.
    pub fn is_incomplete(&self) -> bool {
        self.email.trim().is_empty() || self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
