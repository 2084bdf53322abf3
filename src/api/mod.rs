//! # API Module
//!
//! HTTP endpoints of the relay, built on [Axum](https://docs.rs/axum).
//!
//! ## Endpoints
//!
//! - [`spotify`] - `GET /api/spotify?url=<track link>`. Validates the link,
//!   runs the [`TrackResolver`](crate::resolver::TrackResolver) and answers
//!   with `{success, data}` or `{success, error}`.
//! - [`health`] - `GET /api/health`. Liveness probe, always `200`.
//!
//! ## Error Mapping
//!
//! [`ApiError`] turns a [`ResolveError`](crate::error::ResolveError) into a
//! response: validation failures become `400`, everything else `500`. The
//! error message is passed through unchanged.

mod error;
mod health;
mod spotify;

pub use error::ApiError;
pub use health::health;
pub use spotify::spotify;
