//! Catalog API Data Transfer Objects
//!
//! These types match EXACTLY what the catalog web API returns.
//! DO NOT add fields that aren't in the API response.
//! DO NOT use these types outside the catalog module - convert to domain types.
//!
//! Example search response:
//! ```json
//! {
//!   "tracks": {
//!     "items": [{
//!       "id": "3n3Ppam7vgaVa1iaRUc9Lp",
//!       "name": "Mr. Brightside",
//!       "artists": [{"id": "artist-id", "name": "The Killers"}],
//!       "album": {"name": "Hot Fuss", "release_date": "2004-06-15"},
//!       "popularity": 88
//!     }]
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Response from the client-credentials token endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: u64,
}

/// Error body from the token endpoint (shape differs from API errors)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenError {
    pub error: String,
    pub error_description: Option<String>,
}

/// Error envelope returned by the API endpoints
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiErrorBody {
    pub status: u16,
    pub message: String,
}

/// Top-level search response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    pub tracks: TrackPage,
}

/// One page of ranked track candidates
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackPage {
    #[serde(default)]
    pub items: Vec<Track>,
}

/// Full track object (also the item shape inside search results)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    pub album: Album,
    #[serde(default)]
    pub popularity: u32,
    #[serde(default)]
    pub explicit: bool,
    #[serde(default)]
    pub track_number: u32,
    #[serde(default)]
    pub disc_number: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Artist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Album {
    pub name: String,
    pub release_date: Option<String>,
}

/// Audio-features object for one track
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AudioFeatures {
    pub danceability: f64,
    pub energy: f64,
    pub key: i32,
    pub loudness: f64,
    pub mode: i32,
    pub speechiness: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub valence: f64,
    pub tempo: f64,
    pub time_signature: i32,
    pub duration_ms: u64,
}

/// Audio-analysis response; only the track-level summary is consumed
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AudioAnalysis {
    pub track: AnalysisTrack,
}

/// Track-level analysis summary.
///
/// Repeats tempo/key/mode/time-signature estimates already covered by
/// [`AudioFeatures`]; the adapter keeps only the confidence values.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisTrack {
    #[serde(default)]
    pub tempo: f64,
    #[serde(default)]
    pub tempo_confidence: f64,
    #[serde(default)]
    pub time_signature: i32,
    #[serde(default)]
    pub time_signature_confidence: f64,
    #[serde(default)]
    pub key: i32,
    #[serde(default)]
    pub key_confidence: f64,
    #[serde(default)]
    pub mode: i32,
    #[serde(default)]
    pub mode_confidence: f64,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================
