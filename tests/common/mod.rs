#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use spotirelay::config::ResolverConfig;
use tokio::net::TcpListener;

pub const CLIENT_ID: &str = "test-id";
pub const CLIENT_SECRET: &str = "test-secret";
pub const ACCESS_TOKEN: &str = "token-123";
pub const TRACK_ID: &str = "4cOdK2wGLETKBW3PvgPWqT";
pub const TRACK_URL: &str = "https://open.spotify.com/track/4cOdK2wGLETKBW3PvgPWqT";

/// Canned answers of the fake Spotify and conversion services.
#[derive(Debug, Clone)]
pub struct MockUpstream {
    pub token: (StatusCode, String),
    pub track: (StatusCode, String),
    pub job: (StatusCode, String),
    pub task: (StatusCode, String),
}

impl Default for MockUpstream {
    fn default() -> Self {
        MockUpstream {
            token: ok(json!({ "access_token": ACCESS_TOKEN, "token_type": "Bearer", "expires_in": 3600 })),
            track: ok(track_json()),
            job: ok(json!({ "result": { "gid": "g1", "id": "i1" } })),
            task: ok(json!({ "result": { "download_url": "/dl/123.mp3" } })),
        }
    }
}

pub fn ok(body: Value) -> (StatusCode, String) {
    (StatusCode::OK, body.to_string())
}

pub fn track_json() -> Value {
    json!({
        "name": "Never Gonna Give You Up",
        "artists": [{ "name": "Rick Astley" }, { "name": "Someone Else" }],
        "duration_ms": 125000,
        "popularity": 87,
        "preview_url": "https://p.scdn.co/mp3-preview/abc",
        "album": { "images": [{ "url": "https://i.scdn.co/image/large" }, { "url": "https://i.scdn.co/image/small" }] },
        "external_urls": { "spotify": "https://open.spotify.com/track/4cOdK2wGLETKBW3PvgPWqT" }
    })
}

/// Every request the fake services saw, as `METHOD path`, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    fn push(&self, call: String) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

#[derive(Clone)]
struct MockState {
    upstream: Arc<MockUpstream>,
    log: CallLog,
}

fn reply((status, body): &(StatusCode, String)) -> Response {
    (status.to_owned(), [(header::CONTENT_TYPE, "application/json")], body.clone()).into_response()
}

async fn token(State(state): State<MockState>, headers: HeaderMap, body: String) -> Response {
    state.log.push("POST /api/token".to_string());

    let expected = spotirelay::spotify::auth::basic_auth_header(CLIENT_ID, CLIENT_SECRET);
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(expected.as_str());

    if !authorized || body != "grant_type=client_credentials" {
        return reply(&(StatusCode::BAD_REQUEST, json!({ "error": "invalid_client" }).to_string()));
    }
    reply(&state.upstream.token)
}

async fn track(State(state): State<MockState>, Path(id): Path<String>, headers: HeaderMap) -> Response {
    state.log.push(format!("GET /v1/tracks/{}", id));

    let bearer = format!("Bearer {}", ACCESS_TOKEN);
    if headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) != Some(bearer.as_str()) {
        return reply(&(StatusCode::UNAUTHORIZED, json!({ "error": "bad token" }).to_string()));
    }
    if id != TRACK_ID {
        return reply(&(StatusCode::NOT_FOUND, json!({ "error": "not found" }).to_string()));
    }
    reply(&state.upstream.track)
}

async fn job(State(state): State<MockState>, Query(params): Query<HashMap<String, String>>) -> Response {
    let url = params.get("url").cloned().unwrap_or_default();
    state.log.push(format!("GET /spotify/get?url={}", url));
    reply(&state.upstream.job)
}

async fn task(State(state): State<MockState>, Path((gid, id)): Path<(String, String)>) -> Response {
    state.log.push(format!("GET /spotify/mp3-convert-task/{}/{}", gid, id));
    reply(&state.upstream.task)
}

/// Starts the fake upstreams on an ephemeral port and returns a resolver
/// config pointing at them.
pub async fn spawn_upstream(upstream: MockUpstream) -> (ResolverConfig, CallLog) {
    let log = CallLog::default();
    let state = MockState {
        upstream: Arc::new(upstream),
        log: log.clone(),
    };

    let app = Router::new()
        .route("/api/token", post(token))
        .route("/v1/tracks/{id}", get(track))
        .route("/spotify/get", get(job))
        .route("/spotify/mp3-convert-task/{gid}/{id}", get(task))
        .with_state(state);

    let base = serve(app).await;
    let config = ResolverConfig {
        client_id: CLIENT_ID.to_string(),
        client_secret: CLIENT_SECRET.to_string(),
        token_url: format!("{}/api/token", base),
        api_url: format!("{}/v1", base),
        conversion_url: base,
        request_timeout: Duration::from_secs(5),
    };

    (config, log)
}

/// Serves a router on `127.0.0.1:0` and returns its base URL.
pub async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}
