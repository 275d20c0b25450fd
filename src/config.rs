//! Credential loading.
//!
//! The two required secrets (client id, client secret) are read from the
//! process environment first, under either of two accepted name pairs, and
//! then from a TOML config file in the OS-standard config directory:
//! - Windows: %APPDATA%\trackprobe\config.toml
//! - macOS: ~/Library/Application Support/trackprobe/config.toml
//! - Linux: ~/.config/trackprobe/config.toml
//!
//! A name pair only counts when both values are present and non-empty.
//! Credentials are loaded once at startup and never written back.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::catalog::CatalogError;

/// Accepted environment variable pairs, primary first
const ENV_PAIRS: [(&str, &str); 2] = [
    ("SPOTIFY_CLIENT_ID", "SPOTIFY_CLIENT_SECRET"),
    ("CLIENT_ID", "CLIENT_SECRET"),
];

/// API credentials for the client-credentials flow
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Config file shape; only the credentials table is recognized
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    credentials: FileCredentials,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileCredentials {
    client_id: Option<String>,
    client_secret: Option<String>,
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("trackprobe").join("config.toml"))
}

/// Load credentials from the environment or the config file.
///
/// Fails fast with a configuration error before any network call when
/// neither source yields both values.
pub fn load_credentials() -> Result<Credentials, CatalogError> {
    if let Some(credentials) = credentials_from(|key| std::env::var(key).ok()) {
        tracing::debug!("loaded credentials from environment");
        return Ok(credentials);
    }

    if let Some(path) = config_path()
        && path.exists()
        && let Some(credentials) = credentials_from_file(&path)?
    {
        tracing::debug!("loaded credentials from {:?}", path);
        return Ok(credentials);
    }

    Err(CatalogError::Configuration(
        "set SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET (or CLIENT_ID and CLIENT_SECRET) \
         in the environment, or add a [credentials] table to the config file"
            .to_string(),
    ))
}

/// Try each accepted name pair against a key lookup, primary pair first
fn credentials_from(lookup: impl Fn(&str) -> Option<String>) -> Option<Credentials> {
    for (id_key, secret_key) in ENV_PAIRS {
        let client_id = lookup(id_key).filter(|v| !v.is_empty());
        let client_secret = lookup(secret_key).filter(|v| !v.is_empty());
        if let (Some(client_id), Some(client_secret)) = (client_id, client_secret) {
            return Some(Credentials {
                client_id,
                client_secret,
            });
        }
    }
    None
}

/// Read credentials from a TOML config file.
///
/// Returns `Ok(None)` when the file parses but the credentials table is
/// incomplete; a malformed file is a configuration error.
fn credentials_from_file(path: &Path) -> Result<Option<Credentials>, CatalogError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        CatalogError::Configuration(format!("failed to read config file {path:?}: {e}"))
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| {
        CatalogError::Configuration(format!("failed to parse config file {path:?}: {e}"))
    })?;

    let client_id = config.credentials.client_id.filter(|v| !v.is_empty());
    let client_secret = config.credentials.client_secret.filter(|v| !v.is_empty());

    match (client_id, client_secret) {
        (Some(client_id), Some(client_secret)) => Ok(Some(Credentials {
            client_id,
            client_secret,
        })),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_in<'a>(vars: &'a HashMap<&'a str, &'a str>) -> impl Fn(&str) -> Option<String> + 'a {
        |key| vars.get(key).map(|v| v.to_string())
    }

    #[test]
    fn test_primary_pair_wins() {
        let vars = HashMap::from([
            ("SPOTIFY_CLIENT_ID", "primary-id"),
            ("SPOTIFY_CLIENT_SECRET", "primary-secret"),
            ("CLIENT_ID", "fallback-id"),
            ("CLIENT_SECRET", "fallback-secret"),
        ]);

        let credentials = credentials_from(lookup_in(&vars)).unwrap();
        assert_eq!(credentials.client_id, "primary-id");
        assert_eq!(credentials.client_secret, "primary-secret");
    }

    #[test]
    fn test_fallback_pair_used_when_primary_incomplete() {
        let vars = HashMap::from([
            ("SPOTIFY_CLIENT_ID", "primary-id"),
            ("CLIENT_ID", "fallback-id"),
            ("CLIENT_SECRET", "fallback-secret"),
        ]);

        let credentials = credentials_from(lookup_in(&vars)).unwrap();
        assert_eq!(credentials.client_id, "fallback-id");
    }

    #[test]
    fn test_missing_both_pairs_yields_none() {
        let vars = HashMap::new();
        assert!(credentials_from(lookup_in(&vars)).is_none());
    }

    #[test]
    fn test_empty_values_do_not_count() {
        let vars = HashMap::from([
            ("SPOTIFY_CLIENT_ID", "id"),
            ("SPOTIFY_CLIENT_SECRET", ""),
        ]);
        assert!(credentials_from(lookup_in(&vars)).is_none());
    }

    #[test]
    fn test_credentials_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[credentials]\nclient_id = \"file-id\"\nclient_secret = \"file-secret\""
        )
        .unwrap();

        let credentials = credentials_from_file(file.path()).unwrap().unwrap();
        assert_eq!(credentials.client_id, "file-id");
        assert_eq!(credentials.client_secret, "file-secret");
    }

    #[test]
    fn test_incomplete_file_yields_none() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[credentials]\nclient_id = \"only-id\"").unwrap();

        assert!(credentials_from_file(file.path()).unwrap().is_none());
    }

    #[test]
    fn test_malformed_file_is_configuration_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [[[").unwrap();

        let err = credentials_from_file(file.path()).unwrap_err();
        assert_eq!(err.kind(), "configuration");
    }
}
