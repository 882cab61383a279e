//! File-based token storage.

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use directories::ProjectDirs;
use tracing::{debug, warn};

use super::TOKEN_KEY;
use crate::domain::entities::AuthToken;
use crate::domain::errors::SecretError;
use crate::domain::ports::TokenStoragePort;
use crate::infrastructure::config::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER};

/// Stores the raw credential in a single file under the data directory.
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    /// Creates storage in the platform data directory.
    ///
    /// # Errors
    /// Returns error if the data directory cannot be determined.
    pub fn new() -> Result<Self, SecretError> {
        let dir = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| SecretError::NotAvailable("no data directory".into()))?;

        Ok(Self::with_path(dir.join(TOKEN_KEY)))
    }

    /// Creates storage at a specific path (useful for testing).
    #[must_use]
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the credential file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_atomically(&self, contents: &str) -> Result<(), SecretError> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| SecretError::StorageFailed("invalid token path".into()))?;
        std::fs::create_dir_all(parent).map_err(|e| SecretError::AccessFailed(e.to_string()))?;

        let mut temp_file = tempfile::NamedTempFile::new_in(parent)
            .map_err(|e| SecretError::StorageFailed(e.to_string()))?;
        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| SecretError::StorageFailed(e.to_string()))?;
        temp_file
            .persist(&self.path)
            .map_err(|e| SecretError::StorageFailed(e.error.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl TokenStoragePort for FileTokenStorage {
    async fn get_token(&self) -> Result<Option<AuthToken>, SecretError> {
        debug!(path = %self.path.display(), "Reading token file");

        match tokio::fs::read_to_string(&self.path).await {
            // Editors append a newline to hand-written files.
            Ok(contents) => Ok(AuthToken::new(contents.trim_end_matches(['\r', '\n']))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                warn!(error = %e, "Failed to read token file");
                Err(SecretError::RetrievalFailed(e.to_string()))
            }
        }
    }

    async fn store_token(&self, token: &AuthToken) -> Result<(), SecretError> {
        debug!(path = %self.path.display(), "Writing token file");

        self.write_atomically(token.as_str()).map_err(|e| {
            warn!(error = %e, "Failed to write token file");
            e
        })
    }

    async fn delete_token(&self) -> Result<(), SecretError> {
        debug!(path = %self.path.display(), "Removing token file");

        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                warn!(error = %e, "Failed to remove token file");
                Err(SecretError::DeletionFailed(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::application::state::{SessionState, SessionStore};
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_file_means_no_token() {
        let dir = tempdir().unwrap();
        let storage = FileTokenStorage::with_path(dir.path().join("customerToken"));

        assert!(storage.get_token().await.unwrap().is_none());
        assert!(!storage.has_token().await.unwrap());
    }

    #[tokio::test]
    async fn test_store_and_retrieve_raw_token() {
        let dir = tempdir().unwrap();
        let storage = FileTokenStorage::with_path(dir.path().join("nested").join("customerToken"));
        let token = AuthToken::new("raw-credential").unwrap();

        storage.store_token(&token).await.unwrap();

        let on_disk = std::fs::read_to_string(storage.path()).unwrap();
        assert_eq!(on_disk, "raw-credential");
        assert_eq!(storage.get_token().await.unwrap(), Some(token));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = tempdir().unwrap();
        let storage = FileTokenStorage::with_path(dir.path().join("customerToken"));
        storage
            .store_token(&AuthToken::new("raw-credential").unwrap())
            .await
            .unwrap();

        storage.delete_token().await.unwrap();
        storage.delete_token().await.unwrap();

        assert!(!storage.path().exists());
    }

    #[tokio::test]
    async fn test_blank_file_means_no_token() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("customerToken");
        std::fs::write(&path, "\n").unwrap();

        let storage = FileTokenStorage::with_path(path);

        assert!(storage.get_token().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_inner_whitespace_survives_but_line_ending_does_not() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("customerToken");
        std::fs::write(&path, " abc123 \r\n").unwrap();
        let storage = FileTokenStorage::with_path(&path);

        assert_eq!(storage.get_token().await.unwrap().unwrap().as_str(), " abc123 ");

        storage
            .store_token(&AuthToken::new("abc123 ").unwrap())
            .await
            .unwrap();
        assert_eq!(storage.get_token().await.unwrap().unwrap().as_str(), "abc123 ");
    }

    #[tokio::test]
    async fn test_session_survives_restart() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("customerToken");

        let first = SessionStore::new(Arc::new(FileTokenStorage::with_path(&path)));
        first.initialize().await;
        first.login(AuthToken::new("persisted").unwrap()).await.unwrap();
        drop(first);

        let second = SessionStore::new(Arc::new(FileTokenStorage::with_path(&path)));
        assert!(second.state().is_initializing());
        second.initialize().await;

        assert_eq!(second.current_token().unwrap().as_str(), "persisted");

        second.logout().await.unwrap();
        let third = SessionStore::new(Arc::new(FileTokenStorage::with_path(&path)));
        third.initialize().await;
        assert_eq!(third.state(), SessionState::Anonymous);
    }
}
