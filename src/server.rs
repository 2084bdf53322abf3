use std::path::Path;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
};

use crate::{Res, api, config::Settings, info, resolver::TrackResolver};

/// Builds the application router.
///
/// JSON endpoints live under `/api`. The three pages are served from
/// `public_dir`, and any other path falls back to a static file lookup in the
/// same directory.
pub fn router(resolver: TrackResolver, public_dir: &Path) -> Router {
    Router::new()
        .route("/api/spotify", get(api::spotify))
        .route("/api/health", get(api::health))
        .route_service("/", ServeFile::new(public_dir.join("index.html")))
        .route_service("/explore", ServeFile::new(public_dir.join("explore.html")))
        .route_service("/test", ServeFile::new(public_dir.join("test.html")))
        .fallback_service(ServeDir::new(public_dir))
        .layer(CorsLayer::permissive())
        .with_state(resolver)
}

pub async fn start_api_server(settings: Settings) -> Res<()> {
    let addr = settings.server_addr()?;
    let resolver = TrackResolver::new(settings.resolver.clone())?;
    let app = router(resolver, &settings.public_dir);

    let listener = TcpListener::bind(&addr).await?;
    info!("Server running on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
