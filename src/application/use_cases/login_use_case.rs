//! Login use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::LoginRequest;
use crate::application::state::SessionStore;
use crate::domain::errors::LoginError;
use crate::domain::ports::BookingApiPort;

/// Exchanges credentials for a token and starts the session.
#[derive(Clone)]
pub struct LoginUseCase {
    api: Arc<dyn BookingApiPort>,
    session: Arc<SessionStore>,
}

impl LoginUseCase {
    /// Creates new login use case.
    #[must_use]
    pub const fn new(api: Arc<dyn BookingApiPort>, session: Arc<SessionStore>) -> Self {
        Self { api, session }
    }

    /// Executes login with provided request.
    ///
    /// Nothing is stored unless the service returned a token.
    ///
    /// # Errors
    /// Returns error if the form is incomplete, the service rejects the
    /// credentials, or the token cannot be persisted.
    pub async fn execute(&self, request: LoginRequest) -> Result<(), LoginError> {
        let credentials = request.validate()?;
        debug!(email = %credentials.email, "Attempting login");

        let token = self.api.authenticate(&credentials).await.map_err(|e| {
            warn!(error = %e, "Authentication failed");
            e
        })?;

        self.session.login(token).await?;

        info!(email = %credentials.email, "Successfully authenticated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::AuthToken;
    use crate::domain::errors::{ApiError, SessionError};
    use crate::domain::ports::mocks::{FailingTokenStorage, MockBookingApiPort, MockTokenStorage};

    #[tokio::test]
    async fn test_successful_login_starts_session() {
        let mut api = MockBookingApiPort::new();
        api.expect_authenticate()
            .withf(|credentials| {
                credentials.email == "ada@example.com" && credentials.password.as_str() == "secret"
            })
            .times(1)
            .returning(|_| Ok(AuthToken::new("issued-token").unwrap()));
        let storage = Arc::new(MockTokenStorage::new());
        let session = Arc::new(SessionStore::new(storage.clone()));

        let use_case = LoginUseCase::new(Arc::new(api), session.clone());
        let result = use_case
            .execute(LoginRequest::new("ada@example.com", "secret"))
            .await;

        assert!(result.is_ok());
        assert_eq!(session.current_token().unwrap().as_str(), "issued-token");
        assert_eq!(storage.persisted().await.unwrap().as_str(), "issued-token");
    }

    #[tokio::test]
    async fn test_rejected_login_stores_nothing() {
        let mut api = MockBookingApiPort::new();
        api.expect_authenticate()
            .returning(|_| Err(ApiError::rejected(401, Some("Invalid credentials".into()))));
        let storage = Arc::new(MockTokenStorage::new());
        let session = Arc::new(SessionStore::new(storage.clone()));
        session.initialize().await;

        let use_case = LoginUseCase::new(Arc::new(api), session.clone());
        let error = use_case
            .execute(LoginRequest::new("ada@example.com", "wrong"))
            .await
            .unwrap_err();

        assert_eq!(error.user_message(), "Invalid credentials");
        assert!(session.current_token().is_none());
        assert!(storage.persisted().await.is_none());
    }

    #[tokio::test]
    async fn test_incomplete_form_makes_no_call() {
        let mut api = MockBookingApiPort::new();
        api.expect_authenticate().never();
        let session = Arc::new(SessionStore::new(Arc::new(MockTokenStorage::new())));

        let use_case = LoginUseCase::new(Arc::new(api), session);
        let error = use_case
            .execute(LoginRequest::new("", "secret"))
            .await
            .unwrap_err();

        assert!(matches!(error, LoginError::Api(ApiError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces() {
        let mut api = MockBookingApiPort::new();
        api.expect_authenticate()
            .returning(|_| Ok(AuthToken::new("issued-token").unwrap()));
        let session = Arc::new(SessionStore::new(Arc::new(FailingTokenStorage::new(
            false, true,
        ))));

        let use_case = LoginUseCase::new(Arc::new(api), session.clone());
        let error = use_case
            .execute(LoginRequest::new("ada@example.com", "secret"))
            .await
            .unwrap_err();

        assert!(matches!(error, LoginError::Session(SessionError::Storage(_))));
        assert!(session.current_token().is_none());
    }
}
