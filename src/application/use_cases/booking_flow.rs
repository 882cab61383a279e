//! Per-workshop booking attempt state machine.
//!
//! `Idle -> Submitting -> Succeeded | Failed`, with `Failed` returning to
//! `Idle` once its message has been shown for the configured duration.

use std::time::{Duration, Instant};

use tracing::debug;

use super::create_booking_use_case::BookingCommand;
use crate::application::navigation::Route;
use crate::domain::entities::{AuthToken, BookingConfirmation, BookingId, TimeSlotId, WorkshopId};
use crate::domain::errors::ApiError;
use crate::domain::ports::BookingRequest;

/// Shown when booking without an active session.
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to book a workshop.";
/// Shown when booking without a selected time slot.
pub const SLOT_REQUIRED_MESSAGE: &str = "Please select a time slot.";
/// Fallback shown when the service gives no reason.
pub const BOOKING_FAILED_MESSAGE: &str = "Booking failed. Please try again later.";

/// How long a failure stays visible by default.
pub const DEFAULT_ERROR_DISPLAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingState {
    Idle,
    Submitting,
    Succeeded(BookingId),
    Failed { reason: String, since: Instant },
}

/// Booking attempt state for one workshop card.
#[derive(Debug, Clone)]
pub struct BookingFlow {
    workshop_id: WorkshopId,
    state: BookingState,
    error_display: Duration,
}

impl BookingFlow {
    #[must_use]
    pub const fn new(workshop_id: WorkshopId) -> Self {
        Self {
            workshop_id,
            state: BookingState::Idle,
            error_display: DEFAULT_ERROR_DISPLAY,
        }
    }

    /// Sets how long failures remain visible.
    #[must_use]
    pub const fn with_error_display(mut self, duration: Duration) -> Self {
        self.error_display = duration;
        self
    }

    #[must_use]
    pub const fn workshop_id(&self) -> &WorkshopId {
        &self.workshop_id
    }

    #[must_use]
    pub const fn state(&self) -> &BookingState {
        &self.state
    }

    /// Returns whether the book action is enabled.
    #[must_use]
    pub const fn can_submit(&self) -> bool {
        !matches!(self.state, BookingState::Submitting)
    }

    /// Returns the failure message currently displayed.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match &self.state {
            BookingState::Failed { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// Starts an attempt.
    ///
    /// Returns the command to send, or `None` when the attempt was refused:
    /// a request is already in flight, there is no session, or no slot is
    /// selected. The latter two move the flow to `Failed` without any network
    /// call.
    pub fn begin(
        &mut self,
        time_slot_id: Option<&TimeSlotId>,
        token: Option<&AuthToken>,
    ) -> Option<BookingCommand> {
        self.begin_at(time_slot_id, token, Instant::now())
    }

    fn begin_at(
        &mut self,
        time_slot_id: Option<&TimeSlotId>,
        token: Option<&AuthToken>,
        now: Instant,
    ) -> Option<BookingCommand> {
        if !self.can_submit() {
            debug!(workshop_id = %self.workshop_id, "Booking already in flight");
            return None;
        }

        let Some(token) = token else {
            self.fail(LOGIN_REQUIRED_MESSAGE, now);
            return None;
        };

        let Some(time_slot_id) = time_slot_id else {
            self.fail(SLOT_REQUIRED_MESSAGE, now);
            return None;
        };

        self.state = BookingState::Submitting;
        Some(BookingCommand {
            request: BookingRequest {
                workshop_id: self.workshop_id.clone(),
                time_slot_id: time_slot_id.clone(),
            },
            token: token.clone(),
        })
    }

    /// Applies the service response.
    ///
    /// Returns the confirmation route on success. Results arriving when no
    /// attempt is in flight are ignored.
    pub fn complete(&mut self, result: Result<BookingConfirmation, ApiError>) -> Option<Route> {
        self.complete_at(result, Instant::now())
    }

    fn complete_at(
        &mut self,
        result: Result<BookingConfirmation, ApiError>,
        now: Instant,
    ) -> Option<Route> {
        if self.state != BookingState::Submitting {
            debug!(workshop_id = %self.workshop_id, "Ignoring stale booking result");
            return None;
        }

        match result {
            Ok(confirmation) => {
                self.state = BookingState::Succeeded(confirmation.booking_id.clone());
                Some(Route::BookingConfirmation(confirmation.booking_id))
            }
            Err(e) => {
                self.fail(&e.user_message(BOOKING_FAILED_MESSAGE), now);
                None
            }
        }
    }

    /// Clears an expired failure. Returns `true` if the state changed.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    /// Clears a failure shown for longer than the display duration.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        match &self.state {
            BookingState::Failed { since, .. }
                if now.saturating_duration_since(*since) >= self.error_display =>
            {
                self.state = BookingState::Idle;
                true
            }
            _ => false,
        }
    }

    /// Returns to `Idle` after a success has been acted upon.
    pub fn reset(&mut self) {
        if matches!(self.state, BookingState::Succeeded(_)) {
            self.state = BookingState::Idle;
        }
    }

    fn fail(&mut self, reason: &str, now: Instant) {
        self.state = BookingState::Failed {
            reason: reason.to_string(),
            since: now,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::CreateBookingUseCase;
    use crate::domain::ports::mocks::MockBookingApiPort;
    use std::sync::Arc;

    fn flow() -> BookingFlow {
        BookingFlow::new(WorkshopId::from("w1"))
    }

    fn token() -> AuthToken {
        AuthToken::new("tok").unwrap()
    }

    fn slot() -> TimeSlotId {
        TimeSlotId::from("s1")
    }

    /// Drives one attempt the way the workshops screen does: `begin`, the
    /// request, then `complete`.
    async fn attempt(
        flow: &mut BookingFlow,
        use_case: &CreateBookingUseCase,
        token: Option<&AuthToken>,
    ) -> Option<Route> {
        let command = flow.begin(Some(&slot()), token)?;
        let result = use_case.execute(&command).await;
        flow.complete(result)
    }

    #[tokio::test]
    async fn test_without_session_never_calls_api() {
        let mut api = MockBookingApiPort::new();
        api.expect_create_booking().never();
        let use_case = CreateBookingUseCase::new(Arc::new(api));
        let mut flow = flow();

        let route = attempt(&mut flow, &use_case, None).await;

        assert!(route.is_none());
        assert_eq!(flow.error_message(), Some(LOGIN_REQUIRED_MESSAGE));
        assert!(flow.can_submit());
    }

    #[tokio::test]
    async fn test_success_navigates_to_confirmation() {
        let mut api = MockBookingApiPort::new();
        api.expect_create_booking()
            .withf(|request, token| {
                request.workshop_id.as_str() == "w1"
                    && request.time_slot_id.as_str() == "s1"
                    && token.as_str() == "tok"
            })
            .times(1)
            .returning(|_, _| Ok(BookingConfirmation::new("X")));
        let use_case = CreateBookingUseCase::new(Arc::new(api));
        let mut flow = flow();

        let route = attempt(&mut flow, &use_case, Some(&token())).await;

        assert_eq!(route, Some(Route::BookingConfirmation(BookingId::from("X"))));
        assert!(route.unwrap().path().ends_with("/X"));
        assert_eq!(flow.state(), &BookingState::Succeeded(BookingId::from("X")));
    }

    #[tokio::test]
    async fn test_rejection_fails_and_reenables() {
        let mut api = MockBookingApiPort::new();
        api.expect_create_booking()
            .times(1)
            .returning(|_, _| Err(ApiError::rejected(409, Some("Time slot is full".into()))));
        let use_case = CreateBookingUseCase::new(Arc::new(api));
        let mut flow = flow();

        let route = attempt(&mut flow, &use_case, Some(&token())).await;

        assert!(route.is_none());
        assert_eq!(flow.error_message(), Some("Time slot is full"));
        assert!(flow.can_submit());
    }

    #[test]
    fn test_network_failure_uses_fallback() {
        let mut flow = flow();
        flow.begin(Some(&slot()), Some(&token())).unwrap();

        let route = flow.complete(Err(ApiError::network("connection reset")));

        assert!(route.is_none());
        assert_eq!(flow.error_message(), Some(BOOKING_FAILED_MESSAGE));
    }

    #[test]
    fn test_missing_slot_fails_without_command() {
        let mut flow = flow();

        assert!(flow.begin(None, Some(&token())).is_none());
        assert_eq!(flow.error_message(), Some(SLOT_REQUIRED_MESSAGE));
    }

    #[test]
    fn test_double_submit_is_refused() {
        let mut flow = flow();

        assert!(flow.begin(Some(&slot()), Some(&token())).is_some());
        assert!(!flow.can_submit());
        assert!(flow.begin(Some(&slot()), Some(&token())).is_none());
        assert_eq!(flow.state(), &BookingState::Submitting);
    }

    #[test]
    fn test_failure_returns_to_idle_after_display_duration() {
        let start = Instant::now();
        let mut flow = flow().with_error_display(Duration::from_secs(3));
        flow.begin_at(Some(&slot()), None, start);

        assert!(!flow.tick_at(start + Duration::from_secs(1)));
        assert!(flow.error_message().is_some());

        assert!(flow.tick_at(start + Duration::from_secs(3)));
        assert_eq!(flow.state(), &BookingState::Idle);
    }

    #[test]
    fn test_stale_result_is_ignored() {
        let mut flow = flow();

        let route = flow.complete(Ok(BookingConfirmation::new("late")));

        assert!(route.is_none());
        assert_eq!(flow.state(), &BookingState::Idle);
    }

    #[test]
    fn test_retry_after_failure() {
        let mut flow = flow();
        flow.begin(Some(&slot()), None);

        let command = flow.begin(Some(&slot()), Some(&token()));

        assert!(command.is_some());
        assert_eq!(flow.state(), &BookingState::Submitting);
    }
}
