//! Workshop and time slot entities.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use super::ids::{TimeSlotId, WorkshopId};

const DISPLAY_DATE_FORMAT: &str = "%A, %B %-d, %Y";

/// Formats an API date (RFC 3339 or `YYYY-MM-DD`) as a long human date.
///
/// Unparseable input is returned unchanged.
#[must_use]
pub fn format_display_date(raw: &str) -> String {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return datetime.date_naive().format(DISPLAY_DATE_FORMAT).to_string();
    }

    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .map_or_else(
            || raw.to_string(),
            |date| date.format(DISPLAY_DATE_FORMAT).to_string(),
        )
}

/// Bookable interval within a workshop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    id: TimeSlotId,
    start_time: String,
    end_time: String,
    available_spots: u32,
}

impl TimeSlot {
    /// Creates a new time slot.
    #[must_use]
    pub fn new(
        id: impl Into<TimeSlotId>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        available_spots: u32,
    ) -> Self {
        Self {
            id: id.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            available_spots,
        }
    }

    /// Returns the slot ID.
    #[must_use]
    pub const fn id(&self) -> &TimeSlotId {
        &self.id
    }

    /// Returns the start time label.
    #[must_use]
    pub fn start_time(&self) -> &str {
        &self.start_time
    }

    /// Returns the end time label.
    #[must_use]
    pub fn end_time(&self) -> &str {
        &self.end_time
    }

    /// Returns the remaining spots as last reported by the server.
    #[must_use]
    pub const fn available_spots(&self) -> u32 {
        self.available_spots
    }

    /// Returns `start - end` label.
    #[must_use]
    pub fn time_range(&self) -> String {
        format!("{} - {}", self.start_time, self.end_time)
    }
}

/// Bookable event with one or more time slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workshop {
    id: WorkshopId,
    title: String,
    description: String,
    date: String,
    max_capacity: u32,
    time_slots: Vec<TimeSlot>,
}

impl Workshop {
    /// Creates a workshop with no description and no time slots.
    #[must_use]
    pub fn new(id: impl Into<WorkshopId>, title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            date: date.into(),
            max_capacity: 0,
            time_slots: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the maximum capacity.
    #[must_use]
    pub const fn with_max_capacity(mut self, max_capacity: u32) -> Self {
        self.max_capacity = max_capacity;
        self
    }

    /// Sets the ordered time slots.
    #[must_use]
    pub fn with_time_slots(mut self, time_slots: Vec<TimeSlot>) -> Self {
        self.time_slots = time_slots;
        self
    }

    /// Returns the workshop ID.
    #[must_use]
    pub const fn id(&self) -> &WorkshopId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the raw date string.
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Returns the date formatted for display.
    #[must_use]
    pub fn display_date(&self) -> String {
        format_display_date(&self.date)
    }

    /// Returns the maximum capacity.
    #[must_use]
    pub const fn max_capacity(&self) -> u32 {
        self.max_capacity
    }

    /// Returns the time slots in server order.
    #[must_use]
    pub fn time_slots(&self) -> &[TimeSlot] {
        &self.time_slots
    }
}
