//! Public workshop listing.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::Workshop;
use crate::domain::ports::BookingApiPort;

/// Fetches the public workshop catalogue.
#[derive(Clone)]
pub struct ListWorkshopsUseCase {
    api: Arc<dyn BookingApiPort>,
}

impl ListWorkshopsUseCase {
    #[must_use]
    pub const fn new(api: Arc<dyn BookingApiPort>) -> Self {
        Self { api }
    }

    /// Returns workshops in server order, or an empty listing if the request
    /// fails.
    pub async fn execute(&self) -> Vec<Workshop> {
        match self.api.list_workshops().await {
            Ok(workshops) => {
                debug!(count = workshops.len(), "Workshops loaded");
                workshops
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch workshops, showing empty listing");
                Vec::new()
            }
        }
    }
}
