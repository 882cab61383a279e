use serde::{Deserialize, Serialize};

use crate::domain::entities::{
    Booking, BookingConfirmation, BookingStatus, TimeSlot, TimeSlotSummary, Workshop,
    WorkshopSummary,
};

/// `POST /auth/register` body.
#[derive(Debug, Serialize)]
pub struct RegisterBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    pub email: &'a str,
    pub password: &'a str,
}

/// `POST /auth/login` body.
#[derive(Debug, Serialize)]
pub struct LoginBody<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// `POST /auth/login` response.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// `POST /bookings` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingBody<'a> {
    pub workshop_id: &'a str,
    pub time_slot_id: &'a str,
}

/// `POST /bookings` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmationResponse {
    pub booking_id: String,
}

impl From<BookingConfirmationResponse> for BookingConfirmation {
    fn from(value: BookingConfirmationResponse) -> Self {
        Self::new(value.booking_id)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotResponse {
    pub id: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub available_spots: u32,
}

impl From<TimeSlotResponse> for TimeSlot {
    fn from(value: TimeSlotResponse) -> Self {
        Self::new(
            value.id,
            value.start_time,
            value.end_time,
            value.available_spots,
        )
    }
}

/// `GET /workshops` element.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopResponse {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: String,
    #[serde(default)]
    pub max_capacity: u32,
    #[serde(default)]
    pub time_slots: Vec<TimeSlotResponse>,
}

impl From<WorkshopResponse> for Workshop {
    fn from(value: WorkshopResponse) -> Self {
        Self::new(value.id, value.title, value.date)
            .with_description(value.description)
            .with_max_capacity(value.max_capacity)
            .with_time_slots(value.time_slots.into_iter().map(TimeSlot::from).collect())
    }
}

#[derive(Debug, Deserialize)]
pub struct BookingWorkshopResponse {
    pub title: String,
    pub date: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingTimeSlotResponse {
    pub start_time: String,
    pub end_time: String,
}

/// `GET /bookings/my-bookings` element.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: String,
    pub status: BookingStatus,
    pub workshop: BookingWorkshopResponse,
    pub time_slot: BookingTimeSlotResponse,
}

impl From<BookingResponse> for Booking {
    fn from(value: BookingResponse) -> Self {
        Self::new(
            value.id,
            value.status,
            WorkshopSummary {
                title: value.workshop.title,
                date: value.workshop.date,
            },
            TimeSlotSummary {
                start_time: value.time_slot.start_time,
                end_time: value.time_slot.end_time,
            },
        )
    }
}

/// Error body returned by the booking service.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workshop_response_conversion() {
        let json = r#"{
            "id": "w1",
            "title": "Pottery",
            "description": "Clay basics",
            "date": "2026-11-02T00:00:00.000Z",
            "maxCapacity": 10,
            "timeSlots": [
                {"id": "s1", "startTime": "10:00", "endTime": "11:00", "availableSpots": 3}
            ]
        }"#;

        let workshop: Workshop = serde_json::from_str::<WorkshopResponse>(json)
            .unwrap()
            .into();

        assert_eq!(workshop.title(), "Pottery");
        assert_eq!(workshop.max_capacity(), 10);
        assert_eq!(workshop.time_slots()[0].available_spots(), 3);
    }

    #[test]
    fn test_booking_response_conversion() {
        let json = r#"{
            "id": "b1",
            "status": "CONFIRMED",
            "workshop": {"title": "Pottery", "date": "2026-11-02"},
            "timeSlot": {"startTime": "10:00", "endTime": "11:00"}
        }"#;

        let booking: Booking = serde_json::from_str::<BookingResponse>(json)
            .unwrap()
            .into();

        assert_eq!(booking.id().as_str(), "b1");
        assert_eq!(booking.status(), BookingStatus::Confirmed);
        assert_eq!(booking.time_slot().end_time, "11:00");
    }

    #[test]
    fn test_register_body_omits_missing_name() {
        let body = RegisterBody {
            name: None,
            email: "ada@example.com",
            password: "secret1",
        };

        let json = serde_json::to_value(&body).unwrap();

        assert!(json.get("name").is_none());
        assert_eq!(json["email"], "ada@example.com");
    }

    #[test]
    fn test_create_booking_body_is_camel_case() {
        let body = CreateBookingBody {
            workshop_id: "w1",
            time_slot_id: "s1",
        };

        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json, serde_json::json!({"workshopId": "w1", "timeSlotId": "s1"}));
    }
}
