use reqwest::{Client, StatusCode};

use crate::{
    error::ResolveError,
    types::{AccessCredential, SpotifyTrack, TrackQuery},
};

/// Retrieves the metadata of a single track from the Spotify Web API.
///
/// The track page URL is resolved to `<api_url>/tracks/<id>` and requested
/// with the bearer credential from the client-credentials grant.
///
/// # Errors
///
/// - `ResolveError::TrackNotFound` if the API does not know the id, or the
///   body is empty or not a track object
/// - `ResolveError::Upstream` for transport failures and other error statuses
pub async fn get_track(
    client: &Client,
    api_url: &str,
    credential: &AccessCredential,
    query: &TrackQuery,
) -> Result<SpotifyTrack, ResolveError> {
    let api_url = format!("{}/tracks/{}", api_url, query.track_id());

    let res = client
        .get(&api_url)
        .bearer_auth(&credential.access_token)
        .send()
        .await?;

    if matches!(res.status(), StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST) {
        return Err(ResolveError::TrackNotFound(query.track_id().to_string()));
    }

    let body = res.error_for_status()?.text().await?;
    if body.trim().is_empty() {
        return Err(ResolveError::TrackNotFound(format!(
            "empty response for {}",
            query.track_id()
        )));
    }

    serde_json::from_str::<SpotifyTrack>(&body).map_err(|e| {
        ResolveError::TrackNotFound(format!("malformed response for {}: {}", query.track_id(), e))
    })
}
