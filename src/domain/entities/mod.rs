//! Domain entity definitions.

mod booking;
mod ids;
mod token;
mod workshop;

pub use booking::{Booking, BookingConfirmation, BookingStatus, TimeSlotSummary, WorkshopSummary};
pub use ids::{BookingId, TimeSlotId, WorkshopId};
pub use token::AuthToken;
pub use workshop::{TimeSlot, Workshop, format_display_date};
