use crate::types::{
    PREVIEW_PLACEHOLDER, ResolvedTrack, SpotifyTrack, TrackMetadata, TrackQuery, UNKNOWN_ARTIST,
};

/// Formats a duration in milliseconds as `M:SS`.
///
/// Partial seconds are truncated so the seconds field never reaches 60.
pub fn format_duration(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    format!("{}:{:02}", minutes, seconds)
}

pub fn format_popularity(popularity: u32) -> String {
    format!("{}%", popularity)
}

/// Joins the conversion proxy base with the relative artifact path it returned.
pub fn join_download_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

pub fn build_metadata(track: &SpotifyTrack, query: &TrackQuery) -> TrackMetadata {
    let primary_artist = track.artists.first().map(|a| a.name.clone());

    let title = match &primary_artist {
        Some(artist) => format!("{} - {}", artist, track.name),
        None => track.name.clone(),
    };

    let preview = track
        .preview_url
        .clone()
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| PREVIEW_PLACEHOLDER.to_string());

    let thumbnail = track
        .album
        .as_ref()
        .and_then(|album| album.images.first())
        .map(|image| image.url.clone());

    let url = track
        .external_urls
        .as_ref()
        .and_then(|urls| urls.spotify.clone())
        .unwrap_or_else(|| query.as_str().to_string());

    TrackMetadata {
        title,
        artist: primary_artist.unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
        name: track.name.clone(),
        duration: format_duration(track.duration_ms),
        popularity: format_popularity(track.popularity),
        preview,
        thumbnail,
        url,
    }
}

pub fn assemble(metadata: TrackMetadata, download_link: String) -> ResolvedTrack {
    ResolvedTrack {
        metadata,
        download_link,
    }
}
