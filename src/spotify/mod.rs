//! # Spotify Integration Module
//!
//! Thin client for the two Spotify endpoints the relay depends on.
//!
//! ## Endpoints
//!
//! - `POST /api/token` - client-credentials grant, see [`auth::client_credentials`]
//! - `GET /tracks/{id}` - track metadata, see [`tracks::get_track`]
//!
//! Both functions borrow a shared `reqwest::Client` and keep no state of their
//! own. Tokens are requested per resolution and dropped afterwards.

pub mod auth;
pub mod tracks;
