//! Catalog HTTP client
//!
//! Handles authentication and the four fetch operations against the catalog
//! web API: text search plus the three keyed lookups (track metadata, audio
//! features, audio analysis).
//!
//! The bearer token is an explicit field on the client instance, never
//! module-level state, so two clients never share a token. It is obtained
//! lazily on the first authenticated call and reused while unexpired.
//!
//! Retry behavior: a 401 on an API call drops the cached token,
//! re-authenticates once, and retries that single call exactly once. That is
//! the only retry anywhere; network failures and 5xx surface to the caller
//! as transient errors.

use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use super::{adapter, dto};
use crate::catalog::domain::{
    AccessToken, AnalysisSummary, CatalogError, FeatureSet, TrackMetadata, TrackSummary,
};
use crate::config::Credentials;

/// Token endpoint for the client-credentials exchange
const AUTH_URL: &str = "https://accounts.spotify.com/api/token";

/// Base URL for the API endpoints
const API_BASE_URL: &str = "https://api.spotify.com/v1";

/// Bounded client-side timeout; a timeout surfaces as a transient error
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// How many ranked candidates a search requests
const SEARCH_LIMIT: u32 = 10;

/// Treat the token as expired slightly early to avoid racing its lifetime
const EXPIRY_MARGIN_SECS: u64 = 30;

/// Authenticated catalog API client
pub struct CatalogClient {
    http_client: reqwest::Client,
    credentials: Credentials,
    token: Mutex<Option<AccessToken>>,
    auth_url: String,
    api_base_url: String,
}

impl CatalogClient {
    /// Create a new client for the given credentials.
    ///
    /// The client is configured to:
    /// - Accept gzip-compressed responses (reduces bandwidth)
    /// - Send a User-Agent header identifying the application
    /// - Time out individual requests after a few seconds
    pub fn new(credentials: Credentials) -> Self {
        let http_client = reqwest::Client::builder()
            .gzip(true)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            credentials,
            token: Mutex::new(None),
            auth_url: AUTH_URL.to_string(),
            api_base_url: API_BASE_URL.to_string(),
        }
    }

    /// Create a client for testing with custom endpoint URLs
    #[cfg(test)]
    pub fn with_base_urls(
        credentials: Credentials,
        auth_url: impl Into<String>,
        api_base_url: impl Into<String>,
    ) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            credentials,
            token: Mutex::new(None),
            auth_url: auth_url.into(),
            api_base_url: api_base_url.into(),
        }
    }

    /// Perform the client-credentials exchange and return a fresh token
    pub async fn authenticate(&self) -> Result<AccessToken, CatalogError> {
        tracing::debug!("requesting client-credentials token");

        let response = self
            .http_client
            .post(&self.auth_url)
            .basic_auth(&self.credentials.client_id, Some(&self.credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<dto::TokenError>(&body)
                .map(|e| e.error_description.unwrap_or(e.error))
                .unwrap_or_else(|_| status_reason(status));
            return Err(CatalogError::Auth {
                status: status.as_u16(),
                reason,
            });
        }

        let token: dto::TokenResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))?;

        let lifetime = Duration::from_secs(token.expires_in.saturating_sub(EXPIRY_MARGIN_SECS));
        Ok(AccessToken {
            value: token.access_token,
            expires_at: Instant::now() + lifetime,
        })
    }

    /// Search for tracks by free text, optionally narrowed by artist.
    ///
    /// Returns candidates in the service's own relevance order; the caller
    /// trusts that ranking. Zero candidates is a not-found error.
    pub async fn search(
        &self,
        query: &str,
        artist: Option<&str>,
    ) -> Result<Vec<TrackSummary>, CatalogError> {
        let q = match artist {
            Some(artist) => format!("track:{query} artist:{artist}"),
            None => query.to_string(),
        };

        let url = format!(
            "{}/search?q={}&type=track&limit={}",
            self.api_base_url,
            urlencoding::encode(&q),
            SEARCH_LIMIT
        );

        let response: dto::SearchResponse = self.get_json(&url).await?;
        let candidates = adapter::to_summaries(response);

        tracing::debug!(query = %q, candidates = candidates.len(), "search complete");

        if candidates.is_empty() {
            return Err(CatalogError::NotFound(format!(
                "no tracks matched \"{q}\""
            )));
        }
        Ok(candidates)
    }

    /// Fetch track metadata by identifier
    pub async fn get_track(&self, id: &str) -> Result<TrackMetadata, CatalogError> {
        let url = format!("{}/tracks/{}", self.api_base_url, urlencoding::encode(id));
        let track: dto::Track = self.get_json(&url).await?;
        Ok(adapter::to_metadata(track))
    }

    /// Fetch the audio-feature set by identifier
    pub async fn get_audio_features(&self, id: &str) -> Result<FeatureSet, CatalogError> {
        let url = format!(
            "{}/audio-features/{}",
            self.api_base_url,
            urlencoding::encode(id)
        );
        let features: dto::AudioFeatures = self.get_json(&url).await?;
        Ok(adapter::to_features(features))
    }

    /// Fetch the audio-analysis summary by identifier
    pub async fn get_audio_analysis(&self, id: &str) -> Result<AnalysisSummary, CatalogError> {
        let url = format!(
            "{}/audio-analysis/{}",
            self.api_base_url,
            urlencoding::encode(id)
        );
        let analysis: dto::AudioAnalysis = self.get_json(&url).await?;
        Ok(adapter::to_analysis(analysis))
    }

    /// Return a usable bearer token value, authenticating if needed
    async fn bearer_token(&self) -> Result<String, CatalogError> {
        let mut slot = self.token.lock().await;
        if let Some(token) = slot.as_ref()
            && token.is_valid()
        {
            return Ok(token.value.clone());
        }

        let fresh = self.authenticate().await?;
        let value = fresh.value.clone();
        *slot = Some(fresh);
        Ok(value)
    }

    /// Authenticated GET with the single re-authenticate-and-retry on 401
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, CatalogError> {
        let mut token = self.bearer_token().await?;
        let mut retried = false;

        loop {
            let response = self
                .http_client
                .get(url)
                .bearer_auth(&token)
                .send()
                .await
                .map_err(request_error)?;

            let status = response.status();

            if status == reqwest::StatusCode::UNAUTHORIZED && !retried {
                tracing::debug!("token rejected, re-authenticating once");
                retried = true;
                self.token.lock().await.take();
                token = self.bearer_token().await?;
                continue;
            }

            if status.is_success() {
                return response
                    .json::<T>()
                    .await
                    .map_err(|e| CatalogError::Parse(e.to_string()));
            }

            let message = api_error_message(response).await;

            // The API answers 400 for malformed ids and 404 for unknown
            // ones; both mean the identifier resolves to nothing.
            if status == reqwest::StatusCode::BAD_REQUEST
                || status == reqwest::StatusCode::NOT_FOUND
            {
                return Err(CatalogError::NotFound(message));
            }
            if status == reqwest::StatusCode::UNAUTHORIZED {
                return Err(CatalogError::Auth {
                    status: status.as_u16(),
                    reason: message,
                });
            }
            // Everything else (429, 5xx, unexpected statuses) is transient
            return Err(CatalogError::Transient(format!(
                "HTTP {}: {}",
                status.as_u16(),
                message
            )));
        }
    }
}

/// Pull the message out of an API error envelope, falling back to the
/// status line when the body isn't the expected shape
async fn api_error_message(response: reqwest::Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    serde_json::from_str::<dto::ApiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| status_reason(status))
}

fn status_reason(status: reqwest::StatusCode) -> String {
    status.canonical_reason().unwrap_or("unknown").to_string()
}

/// Network-level failures (including timeouts) are transient
fn request_error(e: reqwest::Error) -> CatalogError {
    if e.is_timeout() {
        CatalogError::Transient(format!("request timed out: {e}"))
    } else {
        CatalogError::Transient(e.to_string())
    }
}
