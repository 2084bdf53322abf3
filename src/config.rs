//! Configuration management for the Spotify relay.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API credentials, upstream endpoints and server
//! settings.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the working directory
//! 4. Application defaults (where applicable)

use std::{env, net::SocketAddr, path::PathBuf, time::Duration};

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_SPOTIFY_API_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_CONVERSION_API_URL: &str = "https://api.fabdl.com";
pub const DEFAULT_PUBLIC_DIR: &str = "public";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Loads environment variables from `.env` files.
///
/// Looks for a `.env` file in the platform-specific local data directory under
/// `spotirelay/.env` first, then in the current working directory. Neither file
/// is required; variables already present in the environment are never
/// overwritten.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/spotirelay/.env`
/// - macOS: `~/Library/Application Support/spotirelay/.env`
/// - Windows: `%LOCALAPPDATA%/spotirelay/.env`
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotirelay/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

/// Credentials and endpoints used by the track resolver.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub client_id: String,
    pub client_secret: String,
    pub token_url: String,
    pub api_url: String,
    pub conversion_url: String,
    pub request_timeout: Duration,
}

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_address: String,
    pub port: u16,
    pub public_dir: PathBuf,
    pub resolver: ResolverConfig,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(value) => value.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let timeout_secs = match get("REQUEST_TIMEOUT_SECS") {
            Some(value) => match value.trim().parse::<u64>().ok() {
                Some(secs) if secs > 0 => secs,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "REQUEST_TIMEOUT_SECS",
                        value,
                    });
                }
            },
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let resolver = ResolverConfig {
            client_id: get("SPOTIFY_CLIENT_ID").ok_or(ConfigError::Missing("SPOTIFY_CLIENT_ID"))?,
            client_secret: get("SPOTIFY_CLIENT_SECRET")
                .ok_or(ConfigError::Missing("SPOTIFY_CLIENT_SECRET"))?,
            token_url: get("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_SPOTIFY_API_TOKEN_URL.to_string()),
            api_url: trim_base(
                get("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_SPOTIFY_API_URL.to_string()),
            ),
            conversion_url: trim_base(
                get("CONVERSION_API_URL")
                    .unwrap_or_else(|| DEFAULT_CONVERSION_API_URL.to_string()),
            ),
            request_timeout: Duration::from_secs(timeout_secs),
        };

        Ok(Settings {
            bind_address: get("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            port,
            public_dir: get("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PUBLIC_DIR)),
            resolver,
        })
    }

    /// Returns the socket address the server should bind to.
    pub fn server_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.bind_address, self.port);
        raw.parse().map_err(|_| ConfigError::Invalid {
            key: "BIND_ADDRESS",
            value: self.bind_address.clone(),
        })
    }
}

fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_credentials_only() {
        let settings = Settings::from_lookup(lookup(&[
            ("SPOTIFY_CLIENT_ID", "id"),
            ("SPOTIFY_CLIENT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(settings.port, DEFAULT_PORT);
        assert_eq!(settings.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(settings.public_dir, PathBuf::from("public"));
        assert_eq!(settings.resolver.token_url, DEFAULT_SPOTIFY_API_TOKEN_URL);
        assert_eq!(settings.resolver.api_url, DEFAULT_SPOTIFY_API_URL);
        assert_eq!(settings.resolver.conversion_url, DEFAULT_CONVERSION_API_URL);
        assert_eq!(settings.resolver.request_timeout, Duration::from_secs(30));
        assert_eq!(
            settings.server_addr().unwrap(),
            "0.0.0.0:3000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_missing_secret_is_reported() {
        let err = Settings::from_lookup(lookup(&[("SPOTIFY_CLIENT_ID", "id")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SPOTIFY_CLIENT_SECRET")));
    }

    #[test]
    fn test_empty_value_counts_as_unset() {
        let err = Settings::from_lookup(lookup(&[
            ("SPOTIFY_CLIENT_ID", "  "),
            ("SPOTIFY_CLIENT_SECRET", "secret"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Missing("SPOTIFY_CLIENT_ID")));
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let settings = Settings::from_lookup(lookup(&[
            ("SPOTIFY_CLIENT_ID", "id"),
            ("SPOTIFY_CLIENT_SECRET", "secret"),
            ("PORT", "8081"),
            ("BIND_ADDRESS", "127.0.0.1"),
            ("CONVERSION_API_URL", "http://localhost:9000/"),
            ("REQUEST_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();

        assert_eq!(settings.port, 8081);
        assert_eq!(settings.resolver.conversion_url, "http://localhost:9000");
        assert_eq!(settings.resolver.request_timeout, Duration::from_secs(5));
        assert_eq!(
            settings.server_addr().unwrap(),
            "127.0.0.1:8081".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_invalid_port() {
        let err = Settings::from_lookup(lookup(&[
            ("SPOTIFY_CLIENT_ID", "id"),
            ("SPOTIFY_CLIENT_SECRET", "secret"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        for value in ["0", "soon"] {
            let err = Settings::from_lookup(lookup(&[
                ("SPOTIFY_CLIENT_ID", "id"),
                ("SPOTIFY_CLIENT_SECRET", "secret"),
                ("REQUEST_TIMEOUT_SECS", value),
            ]))
            .unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { key: "REQUEST_TIMEOUT_SECS", .. }),
                "{}",
                value
            );
        }
    }
}
