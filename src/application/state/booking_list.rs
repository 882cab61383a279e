//! Locally held listing of the customer's bookings.

use crate::domain::entities::{Booking, BookingId};

/// Bookings as last returned by the service, plus optimistic cancellations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingList {
    bookings: Vec<Booking>,
}

impl BookingList {
    #[must_use]
    pub const fn new(bookings: Vec<Booking>) -> Self {
        Self { bookings }
    }

    #[must_use]
    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Booking> {
        self.bookings.get(index)
    }

    #[must_use]
    pub fn find(&self, id: &BookingId) -> Option<&Booking> {
        self.bookings.iter().find(|booking| booking.id() == id)
    }

    /// Rewrites the status of `id` to `CANCELED`, leaving every other entry
    /// untouched. Returns `false` if the booking is not in the list.
    pub fn mark_canceled(&mut self, id: &BookingId) -> bool {
        match self.bookings.iter_mut().find(|booking| booking.id() == id) {
            Some(booking) => {
                booking.mark_canceled();
                true
            }
            None => false,
        }
    }
}

impl From<Vec<Booking>> for BookingList {
    fn from(bookings: Vec<Booking>) -> Self {
        Self::new(bookings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{BookingStatus, TimeSlotSummary, WorkshopSummary};

    fn booking(id: &str, status: BookingStatus) -> Booking {
        Booking::new(
            id,
            status,
            WorkshopSummary {
                title: format!("Workshop {id}"),
                date: "2026-11-02".into(),
            },
            TimeSlotSummary {
                start_time: "10:00".into(),
                end_time: "11:00".into(),
            },
        )
    }

    #[test]
    fn test_mark_canceled_only_touches_target() {
        let mut list = BookingList::new(vec![
            booking("b0", BookingStatus::Pending),
            booking("b1", BookingStatus::Confirmed),
            booking("b2", BookingStatus::Confirmed),
        ]);
        let before = list.clone();

        assert!(list.mark_canceled(&BookingId::from("b1")));

        assert_eq!(list.len(), 3);
        assert_eq!(list.get(1).unwrap().status(), BookingStatus::Canceled);
        assert_eq!(list.get(0), before.get(0));
        assert_eq!(list.get(2), before.get(2));
    }

    #[test]
    fn test_mark_canceled_unknown_id() {
        let mut list = BookingList::new(vec![booking("b1", BookingStatus::Confirmed)]);
        let before = list.clone();

        assert!(!list.mark_canceled(&BookingId::from("missing")));
        assert_eq!(list, before);
    }
}
