//! Keyring-based token storage.

use async_trait::async_trait;
use keyring::Entry;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use super::{TOKEN_KEY, TOKEN_SERVICE};
use crate::domain::entities::AuthToken;
use crate::domain::errors::SecretError;
use crate::domain::ports::TokenStoragePort;

/// System keyring token storage adapter.
pub struct KeyringTokenStorage {
    service: String,
    user: String,
}

impl KeyringTokenStorage {
    /// Creates new storage with default names.
    #[must_use]
    pub fn new() -> Self {
        Self::with_names(TOKEN_SERVICE, TOKEN_KEY)
    }

    /// Creates storage with custom names.
    #[must_use]
    pub fn with_names(service: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            user: user.into(),
        }
    }

    fn entry(service: &str, user: &str) -> Result<Entry, SecretError> {
        Entry::new(service, user)
            .map_err(|e| SecretError::AccessFailed(format!("failed to open keyring entry: {e}")))
    }

    /// Runs a keyring call on the blocking pool. Platform keyrings talk to
    /// D-Bus or system services synchronously and may prompt the user, which
    /// would otherwise stall the single-threaded UI loop.
    async fn on_blocking_pool<T, F>(&self, op: F) -> Result<T, SecretError>
    where
        T: Send + 'static,
        F: FnOnce(Entry) -> Result<T, SecretError> + Send + 'static,
    {
        let service = self.service.clone();
        let user = self.user.clone();

        tokio::task::spawn_blocking(move || op(Self::entry(&service, &user)?))
            .await
            .map_err(|e| SecretError::AccessFailed(format!("keyring task failed: {e}")))?
    }
}

impl Default for KeyringTokenStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStoragePort for KeyringTokenStorage {
    async fn get_token(&self) -> Result<Option<AuthToken>, SecretError> {
        debug!(service = %self.service, "Retrieving token from keyring");

        self.on_blocking_pool(|entry| match entry.get_password() {
            Ok(password) => Ok(AuthToken::new(password)),
            Err(keyring::Error::NoEntry) => {
                debug!("No token stored in keyring");
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, "Failed to retrieve token from keyring");
                Err(SecretError::RetrievalFailed(e.to_string()))
            }
        })
        .await
    }

    async fn store_token(&self, token: &AuthToken) -> Result<(), SecretError> {
        debug!(service = %self.service, "Storing token in keyring");

        let secret = Zeroizing::new(token.as_str().to_owned());
        self.on_blocking_pool(move |entry| {
            entry.set_password(&secret).map_err(|e| {
                warn!(error = %e, "Failed to store token in keyring");
                SecretError::StorageFailed(e.to_string())
            })
        })
        .await
    }

    async fn delete_token(&self) -> Result<(), SecretError> {
        debug!(service = %self.service, "Deleting token from keyring");

        self.on_blocking_pool(|entry| match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => {
                warn!(error = %e, "Failed to delete token from keyring");
                Err(SecretError::DeletionFailed(e.to_string()))
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires system keyring"]
    async fn test_store_retrieve_and_delete_token() {
        let storage = KeyringTokenStorage::with_names("workshops-test", "customerToken");
        let token = AuthToken::new("keyring-test-token").unwrap();

        storage.store_token(&token).await.unwrap();
        let retrieved = storage.get_token().await.unwrap();
        assert_eq!(retrieved.unwrap().as_str(), token.as_str());

        storage.delete_token().await.unwrap();
        assert!(storage.get_token().await.unwrap().is_none());
        storage.delete_token().await.unwrap();
    }

    #[tokio::test]
    async fn test_keyring_calls_leave_the_runtime_thread() {
        let storage = KeyringTokenStorage::with_names("workshops-test", "customerToken");
        let runtime_thread = std::thread::current().id();

        // Opening an entry needs no keyring daemon; only reads and writes do.
        let ran_on = storage
            .on_blocking_pool(|_entry| Ok(std::thread::current().id()))
            .await;
        if let Ok(thread) = ran_on {
            assert_ne!(thread, runtime_thread);
        }
    }
}
