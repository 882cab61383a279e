//! Booking service port definition.

use std::fmt;

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::entities::{
    AuthToken, Booking, BookingConfirmation, BookingId, TimeSlotId, Workshop, WorkshopId,
};
use crate::domain::errors::ApiError;

/// Email and password for `authenticate`.
#[derive(Clone)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: Zeroizing<String>,
}

impl Credentials {
    /// Creates credentials.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: Zeroizing::new(password.into()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// New account details for `register`.
#[derive(Clone)]
pub struct Registration {
    /// Display name, omitted from the request when absent.
    pub name: Option<String>,
    /// Account credentials.
    pub credentials: Credentials,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("credentials", &self.credentials)
            .finish()
    }
}

/// Slot reservation for `create_booking`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    /// Workshop being booked.
    pub workshop_id: WorkshopId,
    /// Selected time slot.
    pub time_slot_id: TimeSlotId,
}

/// Port for the remote booking service.
///
/// Operations have no side effects beyond the network call: nothing is cached
/// and nothing is retried.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingApiPort: Send + Sync {
    /// Creates a customer account.
    async fn register(&self, registration: &Registration) -> Result<(), ApiError>;

    /// Exchanges credentials for a session token.
    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthToken, ApiError>;

    /// Lists public workshops in server order.
    async fn list_workshops(&self) -> Result<Vec<Workshop>, ApiError>;

    /// Reserves a time slot.
    async fn create_booking(
        &self,
        request: &BookingRequest,
        token: &AuthToken,
    ) -> Result<BookingConfirmation, ApiError>;

    /// Lists the authenticated customer's bookings.
    async fn list_my_bookings(&self, token: &AuthToken) -> Result<Vec<Booking>, ApiError>;

    /// Cancels one of the customer's bookings.
    async fn cancel_booking(&self, booking_id: &BookingId, token: &AuthToken)
    -> Result<(), ApiError>;
}
