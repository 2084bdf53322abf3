use std::sync::Arc;

use reqwest::Client;

use crate::{
    config::ResolverConfig,
    conversion,
    error::ResolveError,
    spotify,
    types::{ResolvedTrack, TrackQuery},
    utils,
};

/// Resolves a Spotify track link into metadata and a download link.
///
/// Cloning is cheap: the HTTP connection pool and configuration are shared.
/// Nothing else is; every token, track and job handle belongs to a single
/// call of [`TrackResolver::resolve`].
#[derive(Debug, Clone)]
pub struct TrackResolver {
    client: Client,
    config: Arc<ResolverConfig>,
}

impl TrackResolver {
    pub fn new(config: ResolverConfig) -> Result<Self, ResolveError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: ResolverConfig) -> Self {
        TrackResolver {
            client,
            config: Arc::new(config),
        }
    }

    /// Runs the four upstream calls in order and assembles the result.
    ///
    /// 1. client-credentials grant
    /// 2. track metadata
    /// 3. conversion task lookup
    /// 4. converted artifact lookup
    ///
    /// The first failing step aborts the resolution. Nothing is retried.
    pub async fn resolve(&self, query: &TrackQuery) -> Result<ResolvedTrack, ResolveError> {
        let cfg = &self.config;

        let credential = spotify::auth::client_credentials(
            &self.client,
            &cfg.token_url,
            &cfg.client_id,
            &cfg.client_secret,
        )
        .await?;

        let track = spotify::tracks::get_track(&self.client, &cfg.api_url, &credential, query).await?;

        let job = conversion::request_job(&self.client, &cfg.conversion_url, query).await?;
        let path = conversion::get_download_path(&self.client, &cfg.conversion_url, &job).await?;

        let metadata = utils::build_metadata(&track, query);
        let download_link = utils::join_download_url(&cfg.conversion_url, &path);

        Ok(utils::assemble(metadata, download_link))
    }
}
