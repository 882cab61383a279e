//! Booking cancellation with optimistic local update.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::state::BookingList;
use crate::domain::entities::{AuthToken, BookingId};
use crate::domain::errors::ApiError;
use crate::domain::ports::BookingApiPort;

/// Cancels bookings and applies the result to the local listing.
#[derive(Clone)]
pub struct CancelBookingUseCase {
    api: Arc<dyn BookingApiPort>,
}

impl CancelBookingUseCase {
    /// Fallback shown when the service gives no reason.
    pub const FALLBACK_MESSAGE: &'static str = "Failed to cancel booking.";

    #[must_use]
    pub const fn new(api: Arc<dyn BookingApiPort>) -> Self {
        Self { api }
    }

    /// Checks that `id` can be canceled before any network call.
    ///
    /// # Errors
    /// Returns `AuthenticationRequired` without a token, or a validation error
    /// if the booking is unknown or already canceled.
    pub fn validate(
        bookings: &BookingList,
        id: &BookingId,
        token: Option<&AuthToken>,
    ) -> Result<AuthToken, ApiError> {
        let token = token.ok_or(ApiError::AuthenticationRequired)?;

        let booking = bookings
            .find(id)
            .ok_or_else(|| ApiError::validation("Booking not found."))?;
        if !booking.status().is_cancelable() {
            return Err(ApiError::validation("This booking is already canceled."));
        }

        Ok(token.clone())
    }

    /// Sends the cancel request.
    ///
    /// # Errors
    /// Returns the service error.
    pub async fn request(&self, id: &BookingId, token: &AuthToken) -> Result<(), ApiError> {
        match self.api.cancel_booking(id, token).await {
            Ok(()) => {
                info!(booking_id = %id, "Booking canceled");
                Ok(())
            }
            Err(e) => {
                warn!(booking_id = %id, error = %e, "Cancel request failed");
                Err(e)
            }
        }
    }

    /// Applies the outcome of a cancel request to the local listing without
    /// refetching. Only an acknowledged request changes anything.
    ///
    /// Returns `true` if a booking was marked `CANCELED`.
    pub fn apply(bookings: &mut BookingList, id: &BookingId, result: &Result<(), ApiError>) -> bool {
        result.is_ok() && bookings.mark_canceled(id)
    }
}
