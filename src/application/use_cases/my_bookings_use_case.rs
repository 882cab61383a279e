//! Customer booking listing.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::state::BookingList;
use crate::domain::entities::AuthToken;
use crate::domain::errors::ApiError;
use crate::domain::ports::BookingApiPort;

/// Loads the authenticated customer's bookings.
#[derive(Clone)]
pub struct ListMyBookingsUseCase {
    api: Arc<dyn BookingApiPort>,
}

impl ListMyBookingsUseCase {
    /// Shown when the listing cannot be loaded.
    pub const FALLBACK_MESSAGE: &'static str = "Failed to load your bookings.";

    #[must_use]
    pub const fn new(api: Arc<dyn BookingApiPort>) -> Self {
        Self { api }
    }

    /// # Errors
    /// Returns `AuthenticationRequired` without a token, otherwise the
    /// service error.
    pub async fn execute(&self, token: Option<&AuthToken>) -> Result<BookingList, ApiError> {
        let token = token.ok_or(ApiError::AuthenticationRequired)?;

        let bookings = self.api.list_my_bookings(token).await.map_err(|e| {
            warn!(error = %e, "Failed to load bookings");
            e
        })?;

        debug!(count = bookings.len(), "Bookings loaded");
        Ok(BookingList::new(bookings))
    }
}
