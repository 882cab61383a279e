//! Use case implementations.

mod booking_flow;
mod cancel_booking_use_case;
mod create_booking_use_case;
mod list_workshops_use_case;
mod login_use_case;
mod my_bookings_use_case;
mod register_use_case;

pub use booking_flow::{
    BOOKING_FAILED_MESSAGE, BookingFlow, BookingState, DEFAULT_ERROR_DISPLAY,
    LOGIN_REQUIRED_MESSAGE, SLOT_REQUIRED_MESSAGE,
};
pub use cancel_booking_use_case::CancelBookingUseCase;
pub use create_booking_use_case::{BookingCommand, CreateBookingUseCase};
pub use list_workshops_use_case::ListWorkshopsUseCase;
pub use login_use_case::LoginUseCase;
pub use my_bookings_use_case::ListMyBookingsUseCase;
pub use register_use_case::RegisterUseCase;
