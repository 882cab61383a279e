//! Session store: the single owner of the active credential.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::domain::entities::AuthToken;
use crate::domain::errors::SessionError;
use crate::domain::ports::TokenStoragePort;

/// Authentication state observed by views.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Persisted credential not read yet. Not the same as logged out.
    #[default]
    Initializing,
    /// No active credential.
    Anonymous,
    /// Active credential.
    Authenticated(AuthToken),
}

impl SessionState {
    /// Returns the active token, if any.
    #[must_use]
    pub const fn token(&self) -> Option<&AuthToken> {
        match self {
            Self::Authenticated(token) => Some(token),
            Self::Initializing | Self::Anonymous => None,
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub const fn is_initializing(&self) -> bool {
        matches!(self, Self::Initializing)
    }
}

/// Holds the current credential, keeps it persisted, and notifies subscribers
/// on every change.
///
/// The in-memory state is only published after the storage call for that
/// transition has returned, so subscribers never see a token that storage
/// refused.
pub struct SessionStore {
    storage: Arc<dyn TokenStoragePort>,
    state: watch::Sender<SessionState>,
    initialized: AtomicBool,
}

impl SessionStore {
    /// Creates a store in the `Initializing` state.
    #[must_use]
    pub fn new(storage: Arc<dyn TokenStoragePort>) -> Self {
        let (state, _) = watch::channel(SessionState::Initializing);
        Self {
            storage,
            state,
            initialized: AtomicBool::new(false),
        }
    }

    /// Loads the persisted credential once.
    ///
    /// Storage failures degrade to an anonymous session. Calls after the first
    /// one, or after a `login`/`logout`, are no-ops.
    pub async fn initialize(&self) {
        if self.initialized.swap(true, Ordering::SeqCst) {
            debug!("Session already initialized");
            return;
        }

        let next = match self.storage.get_token().await {
            Ok(Some(token)) => {
                info!(token = %token, "Restored persisted session");
                SessionState::Authenticated(token)
            }
            Ok(None) => {
                debug!("No persisted session");
                SessionState::Anonymous
            }
            Err(e) => {
                warn!(error = %e, "Failed to read persisted session, starting anonymous");
                SessionState::Anonymous
            }
        };

        // A login or logout that completed while storage was being read wins.
        self.state.send_if_modified(|state| {
            if state.is_initializing() {
                *state = next;
                true
            } else {
                false
            }
        });
    }

    /// Persists the token and makes it the active session.
    ///
    /// # Errors
    /// Returns error if the token could not be persisted; the active session
    /// is left unchanged in that case.
    pub async fn login(&self, token: AuthToken) -> Result<(), SessionError> {
        debug!(token = %token, "Persisting session token");

        self.storage.store_token(&token).await.map_err(|e| {
            error!(error = %e, "Failed to persist session token");
            SessionError::from(e)
        })?;

        self.initialized.store(true, Ordering::SeqCst);
        self.state.send_replace(SessionState::Authenticated(token));
        info!("Session started");
        Ok(())
    }

    /// Clears the persisted token and the active session.
    ///
    /// The active session is cleared even when storage fails. Logging out
    /// while already logged out is not an error.
    ///
    /// # Errors
    /// Returns error if the persisted token could not be deleted.
    pub async fn logout(&self) -> Result<(), SessionError> {
        let result = self.storage.delete_token().await;

        self.initialized.store(true, Ordering::SeqCst);
        let previous = self.state.send_replace(SessionState::Anonymous);
        if previous.is_authenticated() {
            info!("Session ended");
        } else {
            debug!("Logout without active session");
        }

        result.map_err(|e| {
            error!(error = %e, "Failed to delete persisted session token");
            SessionError::from(e)
        })
    }

    /// Returns the active token.
    #[must_use]
    pub fn current_token(&self) -> Option<AuthToken> {
        self.state.borrow().token().cloned()
    }

    /// Returns a snapshot of the session state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Subscribes to session changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::{FailingTokenStorage, MockTokenStorage};

    fn token(value: &str) -> AuthToken {
        AuthToken::new(value).unwrap()
    }

    #[tokio::test]
    async fn test_starts_initializing_not_logged_out() {
        let store = SessionStore::new(Arc::new(MockTokenStorage::new()));

        assert_eq!(store.state(), SessionState::Initializing);
        assert!(store.current_token().is_none());
    }

    #[tokio::test]
    async fn test_login_then_read_returns_token() {
        let storage = Arc::new(MockTokenStorage::new());
        let store = SessionStore::new(storage.clone());
        store.initialize().await;

        store.login(token("tok-1")).await.unwrap();

        assert_eq!(store.current_token(), Some(token("tok-1")));
        assert_eq!(storage.persisted().await, Some(token("tok-1")));

        store.login(token("tok-2")).await.unwrap();
        assert_eq!(store.current_token(), Some(token("tok-2")));
        assert_eq!(storage.persisted().await, Some(token("tok-2")));
    }

    #[tokio::test]
    async fn test_logout_after_login_is_idempotent() {
        let storage = Arc::new(MockTokenStorage::new());
        let store = SessionStore::new(storage.clone());
        store.initialize().await;
        store.login(token("tok")).await.unwrap();

        store.logout().await.unwrap();
        assert!(store.current_token().is_none());
        assert_eq!(store.state(), SessionState::Anonymous);
        assert!(storage.persisted().await.is_none());

        store.logout().await.unwrap();
        assert!(store.current_token().is_none());
        assert_eq!(store.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_initialize_restores_persisted_token() {
        let storage = Arc::new(MockTokenStorage::with_token(token("persisted")));
        let store = SessionStore::new(storage);

        store.initialize().await;

        assert_eq!(store.current_token(), Some(token("persisted")));
        assert!(store.is_authenticated());
    }

    #[tokio::test]
    async fn test_initialize_without_persisted_token_is_anonymous() {
        let store = SessionStore::new(Arc::new(MockTokenStorage::new()));

        store.initialize().await;

        assert_eq!(store.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_initialize_degrades_on_storage_failure() {
        let store = SessionStore::new(Arc::new(FailingTokenStorage::new(true, false)));

        store.initialize().await;

        assert_eq!(store.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_initialize_runs_once() {
        let storage = Arc::new(MockTokenStorage::with_token(token("first")));
        let store = SessionStore::new(storage.clone());
        store.initialize().await;

        storage.store_token(&token("second")).await.unwrap();
        store.initialize().await;

        assert_eq!(store.current_token(), Some(token("first")));
    }

    #[tokio::test]
    async fn test_initialize_after_logout_does_not_resurrect_session() {
        let storage = Arc::new(MockTokenStorage::with_token(token("stale")));
        let store = SessionStore::new(storage);

        store.logout().await.unwrap();
        store.initialize().await;

        assert_eq!(store.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_login_storage_failure_leaves_state_unchanged() {
        let store = SessionStore::new(Arc::new(FailingTokenStorage::new(false, true)));
        store.initialize().await;

        let result = store.login(token("tok")).await;

        assert!(matches!(result, Err(SessionError::Storage(_))));
        assert_eq!(store.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_logout_storage_failure_still_clears_session() {
        let store = SessionStore::new(Arc::new(FailingTokenStorage::new(false, false)));
        store.login(token("tok")).await.unwrap();

        let failing = SessionStore {
            storage: Arc::new(FailingTokenStorage::new(false, true)),
            state: watch::channel(store.state()).0,
            initialized: AtomicBool::new(true),
        };
        let result = failing.logout().await;

        assert!(result.is_err());
        assert!(failing.current_token().is_none());
    }

    #[tokio::test]
    async fn test_subscribers_observe_transitions() {
        let store = SessionStore::new(Arc::new(MockTokenStorage::new()));
        let mut rx = store.subscribe();
        store.initialize().await;

        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), SessionState::Anonymous);

        store.login(token("tok")).await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().token(), Some(&token("tok")));

        store.logout().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_token_with_whitespace_is_returned_verbatim() {
        let storage = Arc::new(MockTokenStorage::new());
        let store = SessionStore::new(storage.clone());
        store.initialize().await;

        store.login(token("abc123 ")).await.unwrap();

        assert_eq!(store.current_token().unwrap().as_str(), "abc123 ");
        assert_eq!(storage.persisted().await.unwrap().as_str(), "abc123 ");
    }
}
