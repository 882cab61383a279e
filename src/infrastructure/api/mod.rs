//! Booking service API client.

mod client;
mod dto;

pub use client::{BookingApiClient, DEFAULT_API_BASE};
