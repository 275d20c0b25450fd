//! Track resolution: turn user input into a single catalog identifier.
//!
//! An explicit identifier is normalized (URI prefix, share URL, query string)
//! and syntactically validated, but its existence is not checked here - an
//! unknown id surfaces as not-found from the subsequent fetches. A name query
//! goes through search and resolves to the first ranked candidate; the
//! service's own relevance order is trusted with no secondary re-ranking.

use crate::catalog::{CatalogClient, CatalogError, TrackSummary};

/// URI prefix on ids copied from the desktop client
const URI_PREFIX: &str = "spotify:track:";

/// Marker inside share-link URLs
const URL_MARKER: &str = "open.spotify.com/track/";

/// Resolve user input to a track identifier.
///
/// Fails with an input error when neither id nor name is given.
pub async fn resolve(
    client: &CatalogClient,
    track_id: Option<&str>,
    name: Option<&str>,
    artist: Option<&str>,
) -> Result<String, CatalogError> {
    if let Some(raw) = track_id
        && !raw.trim().is_empty()
    {
        let id = normalize_track_id(raw);
        validate_track_id(&id)?;
        return Ok(id);
    }

    let Some(name) = name.filter(|n| !n.trim().is_empty()) else {
        return Err(CatalogError::Input(
            "either a track id or a track name is required".to_string(),
        ));
    };

    let candidates = client.search(name.trim(), artist.filter(|a| !a.trim().is_empty())).await?;
    select_identifier(candidates)
}

/// Pick the identifier of the first ranked candidate
fn select_identifier(candidates: Vec<TrackSummary>) -> Result<String, CatalogError> {
    // `search` already fails with not-found on zero candidates, so through
    // `resolve` this branch is unreachable; it covers direct callers only.
    let Some(candidate) = candidates.into_iter().next() else {
        return Err(CatalogError::NotFound("search returned no candidates".to_string()));
    };

    tracing::debug!(
        id = %candidate.id,
        name = %candidate.name,
        artists = %candidate.artists.join(", "),
        album = %candidate.album,
        popularity = candidate.popularity,
        "selected first search candidate"
    );
    Ok(candidate.id)
}

/// Normalize a track id from its common input forms: plain id, `spotify:track:`
/// URI, or an `open.spotify.com/track/...` share URL with query parameters.
pub fn normalize_track_id(raw: &str) -> String {
    let mut id = raw.trim();

    // Share URL: keep whatever follows the last track path segment
    if let Some(pos) = id.rfind(URL_MARKER) {
        id = &id[pos + URL_MARKER.len()..];
    }

    // Drop query parameters and fragments
    if let Some(pos) = id.find(['?', '#']) {
        id = &id[..pos];
    }

    // URI prefix, possibly repeated in mangled copy-paste input
    while let Some(rest) = id.strip_prefix(URI_PREFIX) {
        id = rest;
    }

    id.trim().to_string()
}

/// Check that a normalized id is plausible: non-empty base62.
///
/// Deliberately loose - a well-formed id for a track the service doesn't
/// know is only discovered by the fetches.
pub fn validate_track_id(id: &str) -> Result<(), CatalogError> {
    if id.is_empty() {
        return Err(CatalogError::Input("track id is empty".to_string()));
    }
    if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(CatalogError::Input(format!(
            "track id \"{id}\" contains characters outside the id alphabet"
        )));
    }
    Ok(())
}
