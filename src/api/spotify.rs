use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde_json::{Value, json};

use crate::{
    api::ApiError,
    info,
    resolver::TrackResolver,
    success,
    types::{SpotifyParams, TrackQuery},
    warning,
};

pub async fn spotify(
    State(resolver): State<TrackResolver>,
    params: Result<Query<SpotifyParams>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(params) = params.map_err(|rejection| {
        warning!("Rejected query string: {}", rejection.body_text());
        ApiError::BadRequest(rejection.body_text())
    })?;
    let raw = params.url.unwrap_or_default();

    let query = TrackQuery::parse(&raw).inspect_err(|e| warning!("Rejected track URL: {}", e))?;

    info!("Resolving {}", query.as_str());
    match resolver.resolve(&query).await {
        Ok(track) => {
            success!("Resolved {}", track.metadata.title);
            Ok(Json(json!({ "success": true, "data": track })))
        }
        Err(e) => {
            warning!("Spotify API Error: {}", e);
            Err(e.into())
        }
    }
}
