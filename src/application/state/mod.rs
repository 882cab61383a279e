//! Client-side state containers.

mod booking_list;
mod session_store;

pub use booking_list::BookingList;
pub use session_store::{SessionState, SessionStore};
