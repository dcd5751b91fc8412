//! In-process stand-in for the Spotify Web API and Accounts service.
//!
//! Replies are scripted through [`MockState`]; every request that reaches the
//! server is recorded so tests can assert on headers, queries and bodies.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use moodwave::{config::SpotifyConfig, spotify::SpotifyClient, types::Credential};
use serde_json::{Value, json};

pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn ok(body: Value) -> Self {
        Self::json(200, body)
    }

    pub fn raw(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    /// Spotify's error envelope.
    pub fn api_error(status: u16, message: &str) -> Self {
        Self::json(status, json!({ "error": { "status": status, "message": message } }))
    }

    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap();
        (status, [(CONTENT_TYPE, "application/json")], self.body).into_response()
    }
}

#[derive(Debug, Clone)]
pub struct Recorded {
    pub authorization: Option<String>,
    pub params: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct MockState {
    pub token: Reply,
    pub top_artists: Reply,
    pub top_tracks: Reply,
    pub recommendations: Reply,
    /// `seed_genres` values containing any of these answer 404.
    pub not_found_genres: Vec<String>,
    /// Every recommendation request answers 404.
    pub always_not_found: bool,
    pub me: Reply,
    pub create_playlist: Reply,
    pub add_tracks: Reply,

    pub token_requests: Vec<Recorded>,
    pub top_requests: Vec<(String, Recorded)>,
    pub recommendation_requests: Vec<Recorded>,
    pub created_playlists: Vec<(String, Value)>,
    pub added_tracks: Vec<(String, Value)>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            token: Reply::ok(json!({
                "access_token": "access-2",
                "token_type": "Bearer",
                "expires_in": 3600,
                "refresh_token": "refresh-2",
                "scope": "user-top-read playlist-modify-private"
            })),
            top_artists: Reply::ok(json!({ "items": [{ "id": "A1" }] })),
            top_tracks: Reply::ok(json!({ "items": [{ "id": "T1" }] })),
            recommendations: Reply::ok(recommendations_body()),
            not_found_genres: vec!["zzz-invalid".to_string()],
            always_not_found: false,
            me: Reply::ok(json!({ "id": "user-1", "display_name": "Test User" })),
            create_playlist: Reply::json(201, json!({ "id": "pl-1" })),
            add_tracks: Reply::json(201, json!({ "snapshot_id": "snap-1" })),
            token_requests: Vec::new(),
            top_requests: Vec::new(),
            recommendation_requests: Vec::new(),
            created_playlists: Vec::new(),
            added_tracks: Vec::new(),
        }
    }
}

/// Two tracks: one complete, one without album art, preview or web link.
pub fn recommendations_body() -> Value {
    json!({
        "tracks": [
            {
                "id": "track-1",
                "name": "Sunrise",
                "uri": "spotify:track:track-1",
                "preview_url": "https://p.scdn.co/mp3-preview/1",
                "external_urls": { "spotify": "https://open.spotify.com/track/track-1" },
                "artists": [
                    { "id": "artist-1", "name": "First" },
                    { "id": "artist-2", "name": "Second" }
                ],
                "album": {
                    "id": "album-1",
                    "name": "Morning",
                    "images": [
                        { "url": "https://i.scdn.co/image/large", "height": 640, "width": 640 },
                        { "url": "https://i.scdn.co/image/small", "height": 64, "width": 64 }
                    ]
                }
            },
            {
                "id": "track-2",
                "name": "Nocturne",
                "uri": "spotify:track:track-2",
                "preview_url": null,
                "artists": [{ "id": "artist-3", "name": "Third" }],
                "album": { "id": "album-2", "name": "Night", "images": [] }
            }
        ]
    })
}

type Shared = Arc<Mutex<MockState>>;

pub struct MockSpotify {
    pub base_url: String,
    pub state: Shared,
}

impl MockSpotify {
    pub async fn spawn() -> Self {
        Self::spawn_with(MockState::default()).await
    }

    pub async fn spawn_with(state: MockState) -> Self {
        let state = Arc::new(Mutex::new(state));
        let app = Router::new()
            .route("/api/token", post(token))
            .route("/v1/me/top/{kind}", get(top_items))
            .route("/v1/recommendations", get(recommendations))
            .route("/v1/me", get(me))
            .route("/v1/users/{user_id}/playlists", post(create_playlist))
            .route("/v1/playlists/{playlist_id}/tracks", post(add_tracks))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn client(&self) -> SpotifyClient {
        SpotifyClient::new(
            SpotifyConfig::new(CLIENT_ID, CLIENT_SECRET)
                .with_hosts(format!("{}/v1", self.base_url), self.base_url.clone()),
        )
    }

    pub fn update(&self, f: impl FnOnce(&mut MockState)) {
        f(&mut self.state.lock().unwrap());
    }

    pub fn snapshot(&self) -> MockState {
        self.state.lock().unwrap().clone()
    }
}

/// A client whose hosts refuse connections.
pub async fn unreachable_client() -> SpotifyClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    drop(listener);
    let base = format!("http://{addr}");
    SpotifyClient::new(
        SpotifyConfig::new(CLIENT_ID, CLIENT_SECRET).with_hosts(format!("{base}/v1"), base),
    )
}

/// A credential valid for the next hour.
pub fn valid_credential() -> Credential {
    Credential::new("access-1", "refresh-1", 3600, "user-top-read", Utc::now())
}

pub fn expired_credential() -> Credential {
    Credential {
        access_token_expires: Utc::now().timestamp_millis() - 1_000,
        ..valid_credential()
    }
}

fn authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn token(
    State(state): State<Shared>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.token_requests.push(Recorded {
        authorization: authorization(&headers),
        params: form,
    });
    state.token.clone().into_response()
}

async fn top_items(
    State(state): State<Shared>,
    Path(kind): Path<String>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.top_requests.push((
        kind.clone(),
        Recorded {
            authorization: authorization(&headers),
            params,
        },
    ));
    match kind.as_str() {
        "artists" => state.top_artists.clone().into_response(),
        "tracks" => state.top_tracks.clone().into_response(),
        _ => Reply::api_error(404, "Not found.").into_response(),
    }
}

async fn recommendations(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut state = state.lock().unwrap();
    let genres = params.get("seed_genres").cloned().unwrap_or_default();
    state.recommendation_requests.push(Recorded {
        authorization: authorization(&headers),
        params,
    });

    let unknown_genre = genres
        .split(',')
        .any(|g| state.not_found_genres.iter().any(|bad| bad == g));
    if state.always_not_found || unknown_genre {
        return Reply::api_error(404, "Not found.").into_response();
    }
    state.recommendations.clone().into_response()
}

async fn me(State(state): State<Shared>) -> Response {
    state.lock().unwrap().me.clone().into_response()
}

async fn create_playlist(
    State(state): State<Shared>,
    Path(user_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.created_playlists.push((user_id, body));
    state.create_playlist.clone().into_response()
}

async fn add_tracks(
    State(state): State<Shared>,
    Path(playlist_id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    state.added_tracks.push((playlist_id, body));
    state.add_tracks.clone().into_response()
}
