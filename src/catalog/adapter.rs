//! Adapter layer: Convert catalog DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.
//! This isolates API changes - if the catalog changes its response format,
//! only this file and dto.rs need to change.
//!
//! De-duplication happens here: the analysis track summary repeats the
//! tempo/key/mode/time-signature estimates that audio-features already
//! provides. [`to_analysis`] drops those repeats and carries only the
//! confidence companions, so the merged record never has two fields for
//! the same concept.

use super::dto;
use crate::catalog::domain::{AnalysisSummary, FeatureSet, TrackMetadata, TrackSummary};

/// Convert a search response into ranked candidates, preserving service order
pub fn to_summaries(response: dto::SearchResponse) -> Vec<TrackSummary> {
    response
        .tracks
        .items
        .into_iter()
        .map(|track| TrackSummary {
            id: track.id,
            name: track.name,
            artists: track.artists.into_iter().map(|a| a.name).collect(),
            album: track.album.name,
            popularity: track.popularity,
        })
        .collect()
}

/// Convert a full track object to domain metadata
pub fn to_metadata(track: dto::Track) -> TrackMetadata {
    let artist_name = track
        .artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    TrackMetadata {
        id: track.id,
        name: track.name,
        artist_name,
        album_name: track.album.name,
        release_date: track.album.release_date.unwrap_or_default(),
        popularity: track.popularity,
        explicit: track.explicit,
        track_number: track.track_number,
        disc_number: track.disc_number,
    }
}

/// Convert audio features to the domain feature set
pub fn to_features(features: dto::AudioFeatures) -> FeatureSet {
    FeatureSet {
        danceability: features.danceability,
        energy: features.energy,
        key: features.key,
        loudness: features.loudness,
        mode: features.mode,
        speechiness: features.speechiness,
        acousticness: features.acousticness,
        instrumentalness: features.instrumentalness,
        liveness: features.liveness,
        valence: features.valence,
        tempo: features.tempo,
        time_signature: features.time_signature,
        duration_ms: features.duration_ms,
    }
}

/// Extract the confidence scores from an analysis response.
///
/// The analysis-level tempo/key/mode/time-signature estimates are dropped
/// here; the feature-level values win in the merged record.
pub fn to_analysis(analysis: dto::AudioAnalysis) -> AnalysisSummary {
    AnalysisSummary {
        tempo_confidence: analysis.track.tempo_confidence,
        time_signature_confidence: analysis.track.time_signature_confidence,
        key_confidence: analysis.track.key_confidence,
        mode_confidence: analysis.track.mode_confidence,
    }
}
