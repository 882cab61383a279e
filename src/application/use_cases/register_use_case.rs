//! Account registration use case.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::RegisterRequest;
use crate::domain::errors::ApiError;
use crate::domain::ports::BookingApiPort;

/// Creates customer accounts.
#[derive(Clone)]
pub struct RegisterUseCase {
    api: Arc<dyn BookingApiPort>,
}

impl RegisterUseCase {
    /// Fallback shown when the service gives no reason.
    pub const FALLBACK_MESSAGE: &'static str = "Registration failed.";

    #[must_use]
    pub const fn new(api: Arc<dyn BookingApiPort>) -> Self {
        Self { api }
    }

    /// Validates the form and registers the account.
    ///
    /// # Errors
    /// Returns validation error without any network call, or the service's
    /// rejection.
    pub async fn execute(&self, request: RegisterRequest) -> Result<(), ApiError> {
        let registration = request.validate().map_err(|e| {
            debug!(error = %e, "Registration form rejected");
            e
        })?;

        self.api.register(&registration).await.map_err(|e| {
            warn!(error = %e, "Registration failed");
            e
        })?;

        info!(email = %registration.credentials.email, "Account registered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockBookingApiPort;

    #[tokio::test]
    async fn test_short_password_makes_no_network_call() {
        let mut api = MockBookingApiPort::new();
        api.expect_register().never();

        let use_case = RegisterUseCase::new(Arc::new(api));
        let error = use_case
            .execute(RegisterRequest::new("Ada", "ada@example.com", "123"))
            .await
            .unwrap_err();

        assert!(error.is_client_side());
        assert_eq!(
            error.user_message(RegisterUseCase::FALLBACK_MESSAGE),
            "Password must be at least 6 characters long."
        );
    }

    #[tokio::test]
    async fn test_successful_registration() {
        let mut api = MockBookingApiPort::new();
        api.expect_register()
            .withf(|registration| {
                registration.name.as_deref() == Some("Ada")
                    && registration.credentials.email == "ada@example.com"
            })
            .times(1)
            .returning(|_| Ok(()));

        let use_case = RegisterUseCase::new(Arc::new(api));
        let result = use_case
            .execute(RegisterRequest::new("Ada", "ada@example.com", "123456"))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_server_rejection_message() {
        let mut api = MockBookingApiPort::new();
        api.expect_register()
            .returning(|_| Err(ApiError::rejected(409, Some("Email already in use".into()))));

        let use_case = RegisterUseCase::new(Arc::new(api));
        let error = use_case
            .execute(RegisterRequest::new("Ada", "ada@example.com", "123456"))
            .await
            .unwrap_err();

        assert_eq!(
            error.user_message(RegisterUseCase::FALLBACK_MESSAGE),
            "Email already in use"
        );
    }
}
