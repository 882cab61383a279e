//! Token storage port definition.

use async_trait::async_trait;

use crate::domain::entities::AuthToken;
use crate::domain::errors::SecretError;

/// Port for credential persistence.
///
/// Implementations hold at most one credential under a single named key.
#[async_trait]
pub trait TokenStoragePort: Send + Sync {
    /// Retrieves stored token.
    async fn get_token(&self) -> Result<Option<AuthToken>, SecretError>;

    /// Stores token, replacing any previous one.
    async fn store_token(&self, token: &AuthToken) -> Result<(), SecretError>;

    /// Deletes stored token. Succeeds when nothing is stored.
    async fn delete_token(&self) -> Result<(), SecretError>;

    /// Checks if token exists.
    async fn has_token(&self) -> Result<bool, SecretError> {
        Ok(self.get_token().await?.is_some())
    }
}
