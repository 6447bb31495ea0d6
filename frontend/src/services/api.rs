use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use async_trait::async_trait;
use shared::{user_lookup_query, Reservation, ReservationQuery, UpdateReservationStatusRequest, UserLookup, UserRecord};

use crate::services::logging::Logger;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Server error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Failed to parse response: {0}")]
    Decode(String),
    #[error("Failed to serialize request: {0}")]
    Encode(String),
}

/// API client for the reservation and user endpoints
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a client that talks to the page's own origin
    pub fn new() -> Self {
        Self::with_base_url(String::new())
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub(crate) fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }

    /// Every reservation recorded for a space, whatever its date or status
    pub async fn get_reservations(&self, query: &ReservationQuery) -> Result<Vec<Reservation>, ApiError> {
        let url = self.url(&format!("/api/reservations?{}", query.to_query_string()));
        self.get_json(&url).await
    }

    /// Every reservation record, used by the overdue sweep
    pub async fn get_all_reservations(&self) -> Result<Vec<Reservation>, ApiError> {
        let url = self.url("/api/reservations/all");
        self.get_json(&url).await
    }

    /// Post a status transition for one reservation
    pub async fn update_reservation_status(&self, request: &UpdateReservationStatusRequest) -> Result<(), ApiError> {
        let url = self.url("/api/updateReservationStatus");

        let response = Request::post(&url)
            .json(request)
            .map_err(|e| ApiError::Encode(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        ensure_ok(response).await.map(|_| ())
    }

    /// User records matching an identifier; empty when none exist
    pub async fn users_by_id(&self, user_id: &str) -> Result<Vec<UserRecord>, ApiError> {
        let url = self.url(&format!("/api/usersById?{}", user_lookup_query(user_id)));
        self.get_json(&url).await
    }

    /// Whether at least one user record exists. Any failure counts as "does not exist".
    pub async fn user_exists(&self, user_id: &str) -> bool {
        match self.users_by_id(user_id).await {
            Ok(users) => !users.is_empty(),
            Err(e) => {
                Logger::error_with_component("api", &format!("Error checking user {}: {}", user_id, e));
                false
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = Request::get(url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let response = ensure_ok(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl UserLookup for ApiClient {
    async fn user_exists(&self, user_id: &str) -> bool {
        ApiClient::user_exists(self, user_id).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

async fn ensure_ok(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(ApiError::Status { status, body })
}
