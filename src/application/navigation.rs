//! Navigation targets between screens.

use crate::domain::entities::BookingId;

/// Screen the app can navigate to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Workshops,
    Login,
    Register,
    MyBookings,
    BookingConfirmation(BookingId),
}

impl Route {
    /// Returns the web-style path of the route.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Workshops => "/workshops".to_string(),
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::MyBookings => "/my-bookings".to_string(),
            Self::BookingConfirmation(id) => format!("/booking-confirmation/{id}"),
        }
    }

    /// Returns whether the route is only meaningful with an active session.
    #[must_use]
    pub const fn requires_session(&self) -> bool {
        matches!(self, Self::MyBookings)
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}
