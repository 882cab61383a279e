//! Credential persistence error types.

use thiserror::Error;

/// Credential storage error variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecretError {
    #[error("failed to access credential storage: {0}")]
    AccessFailed(String),

    #[error("failed to read stored credential: {0}")]
    RetrievalFailed(String),

    #[error("failed to store credential: {0}")]
    StorageFailed(String),

    #[error("failed to delete stored credential: {0}")]
    DeletionFailed(String),

    #[error("credential storage not available: {0}")]
    NotAvailable(String),
}
