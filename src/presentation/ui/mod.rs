//! UI screens.

mod app;
mod bookings_screen;
mod confirmation_screen;
mod login_screen;
mod notification_popup;
mod register_screen;
mod workshops_screen;

pub use app::App;
pub use bookings_screen::{BookingsAction, BookingsScreen};
pub use confirmation_screen::{ConfirmationAction, ConfirmationScreen};
pub use login_screen::{LoginAction, LoginScreen, LoginState};
pub use notification_popup::NotificationPopup;
pub use register_screen::{RegisterAction, RegisterScreen, RegisterState};
pub use workshops_screen::{WorkshopCard, WorkshopsAction, WorkshopsScreen};
