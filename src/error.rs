use thiserror::Error;

/// Failure kinds of a track resolution.
///
/// Every variant aborts the whole resolution; there are no partial results.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The inbound track URL is missing or does not point at a Spotify track.
    /// Raised before any outbound call is made.
    #[error("{0}")]
    Validation(String),

    /// The client-credentials exchange yielded no usable access token.
    #[error("Failed to get Spotify access token: {0}")]
    Authentication(String),

    /// The metadata lookup returned nothing usable for the track.
    #[error("Track not found: {0}")]
    TrackNotFound(String),

    /// The conversion proxy produced no downloadable artifact.
    #[error("Failed to get download URL: {0}")]
    DownloadUnavailable(String),

    /// Transport-level failure talking to either upstream service.
    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
}

impl ResolveError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ResolveError::Validation(_))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}
