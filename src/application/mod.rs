//! Application layer with session state, use cases, and DTOs.

/// Data transfer objects.
pub mod dto;
/// Screen routes.
pub mod navigation;
/// Application services.
pub mod services;
/// Client-side state containers.
pub mod state;
/// Use case implementations.
pub mod use_cases;

pub use dto::{LoginRequest, RegisterRequest};
pub use navigation::Route;
pub use state::{BookingList, SessionState, SessionStore};
pub use use_cases::{
    BookingFlow, BookingState, CancelBookingUseCase, CreateBookingUseCase, ListMyBookingsUseCase,
    ListWorkshopsUseCase, LoginUseCase, RegisterUseCase,
};
