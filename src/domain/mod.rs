//! Domain layer with core business entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Transient user notifications.
pub mod notification;
/// Port definitions.
pub mod ports;

pub use entities::{AuthToken, Booking, BookingStatus, TimeSlot, Workshop};
pub use errors::{ApiError, LoginError, SecretError, SessionError};
pub use notification::{Notification, NotificationLevel};
pub use ports::{BookingApiPort, TokenStoragePort};
