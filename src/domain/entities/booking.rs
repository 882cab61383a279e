//! Customer booking entity.

use serde::{Deserialize, Serialize};

use super::ids::BookingId;
use super::workshop::format_display_date;

/// Server-owned booking status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    /// Awaiting confirmation.
    Pending,
    /// Confirmed by the service.
    Confirmed,
    /// Canceled by the customer.
    Canceled,
}

impl BookingStatus {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Canceled => "CANCELED",
        }
    }

    /// Returns whether the booking can still be canceled.
    #[must_use]
    pub const fn is_cancelable(self) -> bool {
        !matches!(self, Self::Canceled)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workshop fields embedded in a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkshopSummary {
    /// Workshop title.
    pub title: String,
    /// Raw workshop date.
    pub date: String,
}

/// Time slot fields embedded in a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlotSummary {
    /// Start time label.
    pub start_time: String,
    /// End time label.
    pub end_time: String,
}

/// A customer's reservation against one time slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    id: BookingId,
    status: BookingStatus,
    workshop: WorkshopSummary,
    time_slot: TimeSlotSummary,
}

impl Booking {
    /// Creates a new booking.
    #[must_use]
    pub fn new(
        id: impl Into<BookingId>,
        status: BookingStatus,
        workshop: WorkshopSummary,
        time_slot: TimeSlotSummary,
    ) -> Self {
        Self {
            id: id.into(),
            status,
            workshop,
            time_slot,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &BookingId {
        &self.id
    }

    #[must_use]
    pub const fn status(&self) -> BookingStatus {
        self.status
    }

    #[must_use]
    pub const fn workshop(&self) -> &WorkshopSummary {
        &self.workshop
    }

    #[must_use]
    pub const fn time_slot(&self) -> &TimeSlotSummary {
        &self.time_slot
    }

    /// Returns `<date> at <start> - <end>` for display.
    #[must_use]
    pub fn schedule_label(&self) -> String {
        format!(
            "{} at {} - {}",
            format_display_date(&self.workshop.date),
            self.time_slot.start_time,
            self.time_slot.end_time
        )
    }

    /// Applies the local transition to `CANCELED` after an acknowledged cancel.
    pub fn mark_canceled(&mut self) {
        self.status = BookingStatus::Canceled;
    }
}

/// Acknowledgement of a created booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    /// ID of the created booking.
    pub booking_id: BookingId,
}

impl BookingConfirmation {
    /// Creates a confirmation for the given booking.
    #[must_use]
    pub fn new(booking_id: impl Into<BookingId>) -> Self {
        Self {
            booking_id: booking_id.into(),
        }
    }
}
