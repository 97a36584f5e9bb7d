//! Navigation seam used by forced sign-out.

/// Sends the user to the unauthenticated entry point.
pub trait Navigator: Send + Sync + 'static {
    /// Leave the current view and go to the login entry point.
    fn redirect_to_login(&self);
}
