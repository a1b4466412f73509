//! API client for communicating with the Sanad backend.
//!
//! This module provides the `ApiClient` struct for making authenticated
//! requests to fetch campaigns, create donations, and manage sessions.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::{
    Activity, AuthResponse, Campaign, Donation, DonationRequest, LoginRequest, RegisterRequest,
};

use super::ApiError;

/// Path prefix shared by every backend endpoint.
const API_PREFIX: &str = "/api";

/// HTTP request timeout in seconds.
/// 30s allows for slow mobile networks while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// API client for the Sanad backend.
///
/// Clone is cheap and shares both the connection pool and the bearer token
/// cell, so every handle observes the same authentication state. The token
/// is attached to every request whenever one is set; the client does not
/// track which endpoints require it.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Create a new API client targeting the given origin
    /// (e.g. `https://api.sanad.app`). The `/api` prefix is appended here.
    pub fn new(origin: impl Into<String>) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: origin.into(),
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Install or clear the bearer token for subsequent requests.
    pub async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    /// The currently installed bearer token, if any.
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url.trim_end_matches('/'), API_PREFIX, path)
    }

    /// Attach the bearer token (when set) and send the request.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        let request = match self.token.read().await.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        Ok(request.send().await?)
    }

    /// Read the body text, turning non-2xx statuses into `ApiError::Status`
    /// carrying that text.
    async fn read_success(response: reqwest::Response) -> Result<String, ApiError> {
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(%url, "GET");
        let response = self.send(self.http.get(&url).query(query)).await?;
        let body = Self::read_success(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(%url, "POST");
        let response = self.send(self.http.post(&url).json(body)).await?;
        let text = Self::read_success(response).await?;
        Ok(serde_json::from_str(&text)?)
    }

    // ===== Authentication =====

    /// Exchange credentials for a token pair and user record.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.post_json("/auth/login", request).await
    }

    /// Create an account; success shape is identical to `login`.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.post_json("/auth/register", request).await
    }

    /// Invalidate the current session server-side. Empty success body.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let url = self.url("/auth/logout");
        debug!(%url, "POST");
        let response = self.send(self.http.post(&url)).await?;
        Self::read_success(response).await?;
        Ok(())
    }

    // ===== Campaigns =====

    /// Fetch all campaigns.
    pub async fn campaigns(&self) -> Result<Vec<Campaign>, ApiError> {
        self.get_json("/campaigns", &[]).await
    }

    /// Fetch campaigns filtered by category key (e.g. `"water"`).
    pub async fn campaigns_by_category(&self, category: &str) -> Result<Vec<Campaign>, ApiError> {
        self.get_json("/campaigns", &[("category", category)]).await
    }

    /// Fetch a single campaign by id.
    pub async fn campaign(&self, id: i64) -> Result<Campaign, ApiError> {
        self.get_json(&format!("/campaigns/{id}"), &[]).await
    }

    // ===== Donations =====

    /// Create a donation. Not idempotent: the backend offers no client
    /// idempotency key, so a duplicate submission creates a duplicate
    /// donation.
    pub async fn create_donation(&self, request: &DonationRequest) -> Result<Donation, ApiError> {
        self.post_json("/donations", request).await
    }

    // ===== Activity feed =====

    /// Fetch the most recent public activities, newest first.
    pub async fn recent_activities(&self, limit: u32) -> Result<Vec<Activity>, ApiError> {
        self.get_json("/activities/recent", &[("limit", &limit.to_string())])
            .await
    }
}
