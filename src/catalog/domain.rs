//! Internal domain models for track resolution and attribute aggregation.
//!
//! These types are OUR types - they don't change when the catalog API changes.
//! All API responses get converted into these types via the adapter layer.

use std::time::Instant;

use serde::Serialize;

/// A bearer token obtained from the client-credentials exchange.
///
/// Owned by a single [`CatalogClient`](super::CatalogClient) instance so that
/// two clients (e.g. in tests) never share token state.
#[derive(Debug, Clone)]
pub struct AccessToken {
    /// The raw bearer token value
    pub value: String,
    /// When the token stops being usable (lifetime minus a safety margin)
    pub expires_at: Instant,
}

impl AccessToken {
    /// Whether the token can still be sent on a request
    pub fn is_valid(&self) -> bool {
        self.expires_at > Instant::now()
    }
}

/// One candidate from a text search, in the service's relevance order
#[derive(Debug, Clone)]
pub struct TrackSummary {
    /// Opaque track identifier
    pub id: String,
    /// Track title
    pub name: String,
    /// All credited artists
    pub artists: Vec<String>,
    /// Album title
    pub album: String,
    /// Service popularity score (0-100)
    pub popularity: u32,
}

/// Track metadata from the direct keyed lookup
#[derive(Debug, Clone, PartialEq)]
pub struct TrackMetadata {
    pub id: String,
    pub name: String,
    /// All credited artists joined with ", "
    pub artist_name: String,
    pub album_name: String,
    pub release_date: String,
    pub popularity: u32,
    pub explicit: bool,
    pub track_number: u32,
    pub disc_number: u32,
}

/// Audio descriptors computed by the service for one track
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    pub danceability: f64,
    pub energy: f64,
    /// Musical key as pitch class (0-11, -1 when undetected)
    pub key: i32,
    /// Production loudness in dB (typically -60..0)
    pub loudness: f64,
    /// Major (1) or minor (0)
    pub mode: i32,
    pub speechiness: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub valence: f64,
    /// Estimated tempo in BPM
    pub tempo: f64,
    pub time_signature: i32,
    pub duration_ms: u64,
}

/// Confidence scores from the audio-analysis lookup.
///
/// The analysis payload also repeats tempo/key/mode/time-signature estimates;
/// those are dropped by the adapter in favor of the [`FeatureSet`] values, and
/// only the confidence companions survive into the merged record.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSummary {
    pub tempo_confidence: f64,
    pub time_signature_confidence: f64,
    pub key_confidence: f64,
    pub mode_confidence: f64,
}

/// The flattened, de-duplicated attribute record for one track.
///
/// Each field name appears exactly once even though the three source lookups
/// report overlapping concepts; [`TrackRecord::fields`] exposes the labeled
/// field list so the no-collision invariant is mechanically checkable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackRecord {
    // Basic identifiers
    pub track_id: String,
    pub track_name: String,
    pub artist_name: String,
    pub album_name: String,
    pub release_date: String,

    // Audio features (musical attributes)
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

    // Track metadata
    pub popularity: u32,
    pub explicit: bool,
    pub track_number: u32,
    pub disc_number: u32,

    // Analysis summary, kept under distinct names so the feature-level
    // tempo/key/mode values are never overwritten
    pub tempo_confidence: f64,
    pub time_signature_confidence: f64,
    pub key_confidence: f64,
    pub mode_confidence: f64,
}

impl TrackRecord {
    /// Labeled field list in declaration order, one entry per record field.
    ///
    /// This is what the driver prints and what the uniqueness tests inspect.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("track_id", self.track_id.clone()),
            ("track_name", self.track_name.clone()),
            ("artist_name", self.artist_name.clone()),
            ("album_name", self.album_name.clone()),
            ("release_date", self.release_date.clone()),
            ("danceability", self.danceability.to_string()),
            ("energy", self.energy.to_string()),
            ("key", self.key.to_string()),
            ("loudness", self.loudness.to_string()),
            ("mode", self.mode.to_string()),
            ("speechiness", self.speechiness.to_string()),
            ("acousticness", self.acousticness.to_string()),
            ("instrumentalness", self.instrumentalness.to_string()),
            ("liveness", self.liveness.to_string()),
            ("valence", self.valence.to_string()),
            ("tempo", self.tempo.to_string()),
            ("time_signature", self.time_signature.to_string()),
            ("duration_ms", self.duration_ms.to_string()),
            ("popularity", self.popularity.to_string()),
            ("explicit", self.explicit.to_string()),
            ("track_number", self.track_number.to_string()),
            ("disc_number", self.disc_number.to_string()),
            ("tempo_confidence", self.tempo_confidence.to_string()),
            ("time_signature_confidence", self.time_signature_confidence.to_string()),
            ("key_confidence", self.key_confidence.to_string()),
            ("mode_confidence", self.mode_confidence.to_string()),
        ]
    }
}

/// Errors that can occur while fetching track attributes
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("input error: {0}")]
    Input(String),

    #[error("authentication failed (HTTP {status}): {reason}")]
    Auth { status: u16, reason: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("transient error: {0}")]
    Transient(String),

    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl CatalogError {
    /// Stable failure-kind label, used in user-facing error output
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::Input(_) => "input",
            Self::Auth { .. } => "auth",
            Self::NotFound(_) => "not-found",
            Self::Transient(_) => "transient",
            Self::Parse(_) => "parse",
        }
    }
}
