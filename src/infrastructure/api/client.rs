//! Booking service HTTP client.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{
    BookingConfirmationResponse, BookingResponse, CreateBookingBody, ErrorResponse, LoginBody,
    RegisterBody, TokenResponse, WorkshopResponse,
};
use crate::domain::entities::{AuthToken, Booking, BookingConfirmation, BookingId, Workshop};
use crate::domain::errors::ApiError;
use crate::domain::ports::{BookingApiPort, BookingRequest, Credentials, Registration};

const USER_AGENT: &str = concat!("workshops-tui/", env!("CARGO_PKG_VERSION"));

/// Default booking service base URL.
pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";

/// HTTP adapter for the booking service.
pub struct BookingApiClient {
    client: Client,
    base_url: String,
}

impl BookingApiClient {
    /// Creates new client with default base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new() -> Result<Self, ApiError> {
        Self::with_base_url(DEFAULT_API_BASE)
    }

    /// Creates client with custom base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::unexpected(format!("failed to create HTTP client: {e}")))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        debug!(base_url = %base_url, "Booking API client created");

        Ok(Self { client, base_url })
    }

    /// Returns the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Failed to reach booking service");
            if e.is_timeout() {
                ApiError::network("request timed out")
            } else if e.is_connect() {
                ApiError::network("failed to connect to booking service")
            } else {
                ApiError::network(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorResponse>()
            .await
            .ok()
            .and_then(|body| body.message);
        debug!(status = %status, message = ?message, "Booking service rejected request");

        Err(ApiError::rejected(status.as_u16(), message))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response.json::<T>().await.map_err(|e| {
            warn!(error = %e, "Failed to parse booking service response");
            ApiError::decode(e.to_string())
        })
    }
}

#[async_trait]
impl BookingApiPort for BookingApiClient {
    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        let body = RegisterBody {
            name: registration.name.as_deref(),
            email: &registration.credentials.email,
            password: &registration.credentials.password,
        };

        debug!(email = %registration.credentials.email, "Registering account");
        self.send(self.client.post(self.url("/auth/register")).json(&body))
            .await?;
        Ok(())
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthToken, ApiError> {
        let body = LoginBody {
            email: &credentials.email,
            password: &credentials.password,
        };

        debug!(email = %credentials.email, "Authenticating");
        let response = self
            .send(self.client.post(self.url("/auth/login")).json(&body))
            .await?;
        let TokenResponse { token } = Self::decode(response).await?;

        AuthToken::new(token).ok_or_else(|| ApiError::decode("login response contained an empty token"))
    }

    async fn list_workshops(&self) -> Result<Vec<Workshop>, ApiError> {
        debug!("Fetching workshops");
        let response = self.send(self.client.get(self.url("/workshops"))).await?;
        let workshops: Vec<WorkshopResponse> = Self::decode(response).await?;

        Ok(workshops.into_iter().map(Workshop::from).collect())
    }

    async fn create_booking(
        &self,
        request: &BookingRequest,
        token: &AuthToken,
    ) -> Result<BookingConfirmation, ApiError> {
        let body = CreateBookingBody {
            workshop_id: request.workshop_id.as_str(),
            time_slot_id: request.time_slot_id.as_str(),
        };

        debug!(workshop_id = %request.workshop_id, "Creating booking");
        let response = self
            .send(
                self.client
                    .post(self.url("/bookings"))
                    .bearer_auth(token.as_str())
                    .json(&body),
            )
            .await?;
        let confirmation: BookingConfirmationResponse = Self::decode(response).await?;

        Ok(confirmation.into())
    }

    async fn list_my_bookings(&self, token: &AuthToken) -> Result<Vec<Booking>, ApiError> {
        debug!("Fetching customer bookings");
        let response = self
            .send(
                self.client
                    .get(self.url("/bookings/my-bookings"))
                    .bearer_auth(token.as_str()),
            )
            .await?;
        let bookings: Vec<BookingResponse> = Self::decode(response).await?;

        Ok(bookings.into_iter().map(Booking::from).collect())
    }

    async fn cancel_booking(
        &self,
        booking_id: &BookingId,
        token: &AuthToken,
    ) -> Result<(), ApiError> {
        debug!(booking_id = %booking_id, "Canceling booking");
        self.send(
            self.client
                .put(self.url(&format!("/bookings/my-bookings/{booking_id}/cancel")))
                .bearer_auth(token.as_str())
                .json(&serde_json::json!({})),
        )
        .await?;
        Ok(())
    }
}
