//! Session lifecycle error types.

use thiserror::Error;

use super::{ApiError, SecretError};

/// Failure to keep the persisted credential in step with the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("session may be inconsistent: {0}")]
    Storage(#[from] SecretError),
}

/// Login failure, either from the service or from persisting the credential.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl LoginError {
    /// Fallback shown when the service gives no reason.
    pub const FALLBACK_MESSAGE: &'static str = "Login failed. Please check your credentials.";

    /// Returns the text shown to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(error) => error.user_message(Self::FALLBACK_MESSAGE),
            Self::Session(error) => format!("Logged in, but the session could not be saved: {error}"),
        }
    }
}
