//! Authentication DTOs.

use zeroize::Zeroizing;

use crate::domain::errors::ApiError;
use crate::domain::ports::{Credentials, Registration};

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Login form data.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: Zeroizing<String>,
}

impl LoginRequest {
    /// Creates new login request.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Checks required fields before contacting the service.
    ///
    /// # Errors
    /// Returns validation error if email or password is missing.
    pub fn validate(&self) -> Result<Credentials, ApiError> {
        let email = self.email.trim();
        if email.is_empty() {
            return Err(ApiError::validation("Email is required."));
        }
        if self.password.is_empty() {
            return Err(ApiError::validation("Password is required."));
        }

        Ok(Credentials::new(email, self.password.as_str()))
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Registration form data.
#[derive(Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: Zeroizing<String>,
}

impl RegisterRequest {
    /// Creates new registration request.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Checks the form before contacting the service.
    ///
    /// # Errors
    /// Returns validation error describing the first invalid field.
    pub fn validate(&self) -> Result<Registration, ApiError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ApiError::validation("Name is required."));
        }

        let email = self.email.trim();
        if email.is_empty() {
            return Err(ApiError::validation("Email is required."));
        }
        if !email.contains('@') {
            return Err(ApiError::validation("Please enter a valid email address."));
        }

        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ApiError::validation(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters long."
            )));
        }

        Ok(Registration {
            name: Some(name.to_string()),
            credentials: Credentials::new(email, self.password.as_str()),
        })
    }
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_login_request_trims_email() {
        let credentials = LoginRequest::new("  ada@example.com ", "secret")
            .validate()
            .unwrap();
        assert_eq!(credentials.email, "ada@example.com");
        assert_eq!(credentials.password.as_str(), "secret");
    }

    #[test]
    fn test_login_request_requires_fields() {
        assert!(LoginRequest::new("", "secret").validate().is_err());
        assert!(LoginRequest::new("ada@example.com", "").validate().is_err());
    }

    #[test_case("", "ada@example.com", "secret1", "Name is required." ; "missing_name")]
    #[test_case("Ada", "", "secret1", "Email is required." ; "missing_email")]
    #[test_case("Ada", "ada.example.com", "secret1", "Please enter a valid email address." ; "invalid_email")]
    #[test_case("Ada", "ada@example.com", "12345", "Password must be at least 6 characters long." ; "short_password")]
    fn test_register_validation(name: &str, email: &str, password: &str, expected: &str) {
        let error = RegisterRequest::new(name, email, password)
            .validate()
            .unwrap_err();
        assert_eq!(error, ApiError::validation(expected));
    }

    #[test]
    fn test_register_request_valid() {
        let registration = RegisterRequest::new(" Ada ", "ada@example.com", "123456")
            .validate()
            .unwrap();
        assert_eq!(registration.name.as_deref(), Some("Ada"));
        assert_eq!(registration.credentials.email, "ada@example.com");
    }
}
