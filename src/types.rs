use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::ResolveError;

pub const SPOTIFY_HOST: &str = "open.spotify.com";
pub const PREVIEW_PLACEHOLDER: &str = "No preview audio Available";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// A validated reference to a Spotify track page.
///
/// Keeps the URL exactly as the caller sent it, since the conversion proxy
/// is queried with the original link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackQuery {
    url: String,
    track_id: String,
}

impl TrackQuery {
    /// Parses an `open.spotify.com` track link.
    ///
    /// Accepts `https://open.spotify.com/track/<id>` as well as localized
    /// links like `https://open.spotify.com/intl-de/track/<id>`. Query strings
    /// such as `?si=...` are ignored for the id but kept in the URL.
    pub fn parse(raw: &str) -> Result<Self, ResolveError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ResolveError::Validation(
                "URL parameter is required".to_string(),
            ));
        }

        let invalid = || ResolveError::Validation("Please provide a valid Spotify URL".to_string());

        let url = Url::parse(raw).map_err(|_| invalid())?;
        if !matches!(url.scheme(), "http" | "https") || url.host_str() != Some(SPOTIFY_HOST) {
            return Err(invalid());
        }

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        let track_id = match segments.as_slice() {
            ["track", id] => *id,
            [locale, "track", id] if locale.starts_with("intl-") => *id,
            _ => return Err(invalid()),
        };

        if !track_id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(invalid());
        }

        Ok(TrackQuery {
            url: raw.to_string(),
            track_id: track_id.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn track_id(&self) -> &str {
        &self.track_id
    }
}

/// Bearer token from a client-credentials grant. Lives for one resolution.
#[derive(Debug, Clone)]
pub struct AccessCredential {
    pub access_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTrack {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SpotifyArtist>,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub popularity: u32,
    pub preview_url: Option<String>,
    pub album: Option<SpotifyAlbum>,
    pub external_urls: Option<ExternalUrls>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyArtist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyAlbum {
    #[serde(default)]
    pub images: Vec<SpotifyImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyImage {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

/// Handle of a conversion task on the proxy side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub gid: String,
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversionInfoResponse {
    pub result: Option<ConversionInfo>,
}

/// The proxy has been seen returning both numeric and string ids.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversionInfo {
    pub gid: Option<serde_json::Value>,
    pub id: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversionTaskResponse {
    pub result: Option<ConversionTask>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversionTask {
    pub download_url: Option<String>,
}

/// Display-ready track metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackMetadata {
    pub title: String,
    pub artist: String,
    pub name: String,
    pub duration: String,
    pub popularity: String,
    pub preview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub url: String,
}

/// Final result of a resolution: metadata plus a fully-qualified download link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTrack {
    #[serde(flatten)]
    pub metadata: TrackMetadata,
    pub download_link: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyParams {
    pub url: Option<String>,
}
