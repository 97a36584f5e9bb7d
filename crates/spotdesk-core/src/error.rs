//! Error types for spotdesk.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, API, decoding and input validation errors.
//!
//! Every error is `Clone`: the outcome of a coalesced session refresh is
//! handed to every request waiting on it.

use std::fmt;
use thiserror::Error;

/// Server messages that identify an expired or unknown access token.
const TOKEN_EXPIRY_PHRASES: &[&str] = &["invalid or expired token", "token not found", "jwt expired"];

/// Machine-readable codes that identify an expired or unknown access token.
const TOKEN_EXPIRY_CODES: &[&str] = &["TOKEN_EXPIRED", "INVALID_TOKEN"];

/// Fallback shown to users when an error carries nothing readable.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong.";

/// The unified error type for spotdesk operations.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, request building).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication and session errors.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Non-success responses from the backend.
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// A success response whose body did not match the expected shape.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// Input validation errors.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Session persistence errors.
    #[error("storage error: {message}")]
    Storage { message: String },
}

impl Error {
    /// Returns true if this is a 401 that means "your access token is stale".
    pub fn is_token_expired(&self) -> bool {
        matches!(self, Error::Api(api) if api.is_token_expired())
    }

    /// Returns the HTTP status if the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(api) => Some(api.status),
            _ => None,
        }
    }

    /// A human-readable message suitable for showing to the user.
    ///
    /// Prefers the server's `message`, then its `error` field, then the
    /// transport message.
    pub fn user_message(&self) -> String {
        match self {
            Error::Api(api) => api
                .message
                .as_deref()
                .filter(|m| !m.is_empty())
                .or(api.error.as_deref().filter(|e| !e.is_empty()))
                .map(str::to_string)
                .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string()),
            Error::Transport(err) => {
                let message = err.to_string();
                if message.is_empty() {
                    GENERIC_ERROR_MESSAGE.to_string()
                } else {
                    message
                }
            }
            other => other.to_string(),
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The backend rejected the login.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No session exists; sign in first.
    #[error("not signed in")]
    NotAuthenticated,

    /// The session could not be recovered and was signed out.
    #[error("session expired")]
    SessionExpired,
}

/// A non-success response from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Short error string from the envelope (if present).
    pub error: Option<String>,
    /// Machine-readable error code (if present).
    pub code: Option<String>,
    /// Error message from the server.
    pub message: Option<String>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref code) = self.code {
            write!(f, " [{}]", code)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        } else if let Some(ref error) = self.error {
            write!(f, ": {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self {
            status,
            error: None,
            code: None,
            message,
        }
    }

    /// Attach the envelope's `error` string.
    pub fn with_error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }

    /// Attach the envelope's machine-readable code.
    pub fn with_code(mut self, code: Option<String>) -> Self {
        self.code = code;
        self
    }

    /// Check if this is a token-expiry rejection.
    ///
    /// Only a 401 qualifies. A recognised error code wins; otherwise both
    /// `message` and `error` are matched against the known expiry phrases.
    /// Any other 401 (bad credentials, missing permission) is not an expiry.
    pub fn is_token_expired(&self) -> bool {
        if self.status != 401 {
            return false;
        }

        if let Some(code) = self.code.as_deref()
            && TOKEN_EXPIRY_CODES
                .iter()
                .any(|known| code.eq_ignore_ascii_case(known))
        {
            return true;
        }

        [self.message.as_deref(), self.error.as_deref()]
            .into_iter()
            .flatten()
            .map(str::to_lowercase)
            .any(|text| TOKEN_EXPIRY_PHRASES.iter().any(|phrase| text.contains(phrase)))
    }
}

/// Input validation errors.
#[derive(Debug, Clone, Error)]
pub enum InvalidInputError {
    /// Invalid base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// A header value could not be built from a token.
    #[error("invalid header value: {reason}")]
    Header { reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
