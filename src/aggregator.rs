//! Attribute aggregation: three keyed lookups merged into one flat record.
//!
//! Aggregation is all-or-nothing. A track that resolves for metadata but is
//! missing features or analysis is an incomplete result, so the first failed
//! lookup aborts the whole aggregation and no partial record is ever
//! returned. Given fixed upstream responses the merge is a pure function of
//! its three inputs, so re-invoking with the same identifier is idempotent.

use crate::catalog::{
    AnalysisSummary, CatalogClient, CatalogError, FeatureSet, TrackMetadata, TrackRecord,
};

/// Fetch the three per-track resources and merge them into a [`TrackRecord`]
pub async fn aggregate(client: &CatalogClient, id: &str) -> Result<TrackRecord, CatalogError> {
    tracing::debug!(id, "aggregating track attributes");

    let metadata = client.get_track(id).await?;
    let features = client.get_audio_features(id).await?;
    let analysis = client.get_audio_analysis(id).await?;

    Ok(merge(metadata, features, analysis))
}

/// Merge the three response shapes into one flat record.
///
/// The mapping is explicit so the no-collision invariant stays mechanically
/// checkable: metadata contributes the identifiers and catalog fields,
/// features contribute every audio descriptor (including the tempo/key/mode/
/// time-signature values that analysis also reports), and analysis
/// contributes only its confidence scores under `*_confidence` names.
pub fn merge(
    metadata: TrackMetadata,
    features: FeatureSet,
    analysis: AnalysisSummary,
) -> TrackRecord {
    TrackRecord {
        // From track metadata
        track_id: metadata.id,
        track_name: metadata.name,
        artist_name: metadata.artist_name,
        album_name: metadata.album_name,
        release_date: metadata.release_date,
        popularity: metadata.popularity,
        explicit: metadata.explicit,
        track_number: metadata.track_number,
        disc_number: metadata.disc_number,

        // From audio features; these win over the analysis-level estimates
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

        // From audio analysis, under distinct names
        tempo_confidence: analysis.tempo_confidence,
        time_signature_confidence: analysis.time_signature_confidence,
        key_confidence: analysis.key_confidence,
        mode_confidence: analysis.mode_confidence,
    }
}
