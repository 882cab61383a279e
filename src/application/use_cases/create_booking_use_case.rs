//! Booking creation use case.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::{AuthToken, BookingConfirmation};
use crate::domain::errors::ApiError;
use crate::domain::ports::{BookingApiPort, BookingRequest};

/// Authorized request to reserve a slot, produced by the booking flow.
#[derive(Debug, Clone)]
pub struct BookingCommand {
    pub request: BookingRequest,
    pub token: AuthToken,
}

/// Sends booking requests to the service.
#[derive(Clone)]
pub struct CreateBookingUseCase {
    api: Arc<dyn BookingApiPort>,
}

impl CreateBookingUseCase {
    #[must_use]
    pub const fn new(api: Arc<dyn BookingApiPort>) -> Self {
        Self { api }
    }

    /// Reserves the slot described by `command`.
    ///
    /// # Errors
    /// Returns the service's rejection (slot full, slot invalid, ...) or a
    /// network error.
    pub async fn execute(&self, command: &BookingCommand) -> Result<BookingConfirmation, ApiError> {
        let BookingCommand { request, token } = command;

        match self.api.create_booking(request, token).await {
            Ok(confirmation) => {
                info!(
                    workshop_id = %request.workshop_id,
                    time_slot_id = %request.time_slot_id,
                    booking_id = %confirmation.booking_id,
                    "Booking created"
                );
                Ok(confirmation)
            }
            Err(e) => {
                warn!(
                    workshop_id = %request.workshop_id,
                    time_slot_id = %request.time_slot_id,
                    error = %e,
                    "Booking failed"
                );
                Err(e)
            }
        }
    }
}
