//! Booking API error types.

use thiserror::Error;

/// Failures of a booking API operation, including client-side checks that
/// block the call before it is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    #[error("{message}")]
    Validation { message: String },

    #[error("Please log in to continue.")]
    AuthenticationRequired,

    #[error("request rejected with HTTP {status}{}", rejection_suffix(.message))]
    Rejected { status: u16, message: Option<String> },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("failed to decode response: {message}")]
    Decode { message: String },

    #[error("unexpected error: {message}")]
    Unexpected { message: String },
}

#[allow(clippy::ref_option)]
fn rejection_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl ApiError {
    /// Creates client-side validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates server rejection error.
    #[must_use]
    pub fn rejected(status: u16, message: Option<String>) -> Self {
        Self::Rejected {
            status,
            message: message.filter(|m| !m.trim().is_empty()),
        }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates decode error.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns the text shown to the user.
    ///
    /// Client-detected errors carry their own text. A server rejection shows
    /// the server's message when it sent one; every other failure shows the
    /// operation's `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation { message } => message.clone(),
            Self::AuthenticationRequired => self.to_string(),
            Self::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Rejected { message: None, .. }
            | Self::Network { .. }
            | Self::Decode { .. }
            | Self::Unexpected { .. } => fallback.to_string(),
        }
    }

    /// Returns whether the error was detected before any network call.
    #[must_use]
    pub const fn is_client_side(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::AuthenticationRequired)
    }

    /// Returns whether the server rejected the credential.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Rejected { status: 401, .. })
    }
}
