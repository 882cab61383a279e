//! Keyring stand-in for builds without the `keyring` feature.
//!
//! Sessions survive only as long as the process; `--token-storage file`
//! is the persistent alternative.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::entities::AuthToken;
use crate::domain::errors::SecretError;
use crate::domain::ports::TokenStoragePort;

#[derive(Debug, Default, Clone, Copy)]
pub struct KeyringTokenStorage;

impl KeyringTokenStorage {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn with_names(service: impl Into<String>, user: impl Into<String>) -> Self {
        debug!(
            service = %service.into(),
            user = %user.into(),
            "Keyring support not compiled in, ignoring entry names"
        );
        Self
    }
}

#[async_trait]
impl TokenStoragePort for KeyringTokenStorage {
    async fn get_token(&self) -> Result<Option<AuthToken>, SecretError> {
        Ok(None)
    }

    async fn store_token(&self, _token: &AuthToken) -> Result<(), SecretError> {
        debug!("Session kept in memory only");
        Ok(())
    }

    async fn delete_token(&self) -> Result<(), SecretError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stub_never_returns_a_token() {
        let storage = KeyringTokenStorage::new();

        storage
            .store_token(&AuthToken::new("in-memory").unwrap())
            .await
            .unwrap();

        assert!(storage.get_token().await.unwrap().is_none());
        storage.delete_token().await.unwrap();
    }
}
