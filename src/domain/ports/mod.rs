//! Port definitions for external collaborators.

mod booking_api_port;
mod token_storage_port;

pub use booking_api_port::{BookingApiPort, BookingRequest, Credentials, Registration};
pub use token_storage_port::TokenStoragePort;
