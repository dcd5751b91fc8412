mod common;

use common::{MockSpotify, Reply, valid_credential};
use moodwave::{
    api::AppState,
    management::CredentialStore,
    server,
    types::Credential,
};
use reqwest::StatusCode;
use serde_json::{Value, json};
use tempfile::TempDir;

struct TestApi {
    base_url: String,
    spotify: MockSpotify,
    http: reqwest::Client,
    _dir: TempDir,
}

impl TestApi {
    async fn spawn(credential: Option<Credential>) -> Self {
        let spotify = MockSpotify::spawn().await;
        let dir = tempfile::tempdir().unwrap();
        let mut store = CredentialStore::at(dir.path().join("credential.json"));
        if let Some(credential) = credential {
            store.capture(credential);
        }
        let app = server::router(AppState::new(spotify.client(), store));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            spotify,
            http: reqwest::Client::new(),
            _dir: dir,
        }
    }

    async fn authed() -> Self {
        Self::spawn(Some(valid_credential())).await
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }
}

#[tokio::test]
async fn test_health() {
    let api = TestApi::spawn(None).await;
    let (status, body) = api.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "moodwave");
}

#[tokio::test]
async fn test_moods_catalog_needs_no_session() {
    let api = TestApi::spawn(None).await;
    let (status, body) = api.get("/api/moods").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["default"], "happy");
    let moods = body["moods"].as_array().unwrap();
    assert_eq!(moods.len(), 6);
    assert_eq!(moods[0]["key"], "happy");
    assert_eq!(moods[1]["label"], "Melancholic");
}

#[tokio::test]
async fn test_routes_require_a_session() {
    let api = TestApi::spawn(None).await;

    let (status, body) = api.get("/api/mood-playlist?mood=chill").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Unauthorized" }));

    let (status, _) = api.get("/api/genres").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = api
        .post("/api/save-playlist", json!({ "trackUris": ["spotify:track:track-1"] }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert!(api.spotify.snapshot().recommendation_requests.is_empty());
}

#[tokio::test]
async fn test_failed_refresh_is_unauthorized() {
    let expired = Credential {
        access_token_expires: 0,
        ..valid_credential()
    };
    let api = TestApi::spawn(Some(expired)).await;
    api.spotify
        .update(|s| s.token = Reply::json(400, json!({ "error": "invalid_grant" })));

    let (status, _) = api.get("/api/mood-playlist").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = api.get("/api/mood-playlist").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert_eq!(api.spotify.snapshot().token_requests.len(), 1);
}

#[tokio::test]
async fn test_mood_playlist() {
    let api = TestApi::authed().await;
    let (status, body) = api.get("/api/mood-playlist?mood=chill").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mood"], "chill");
    let tracks = body["tracks"].as_array().unwrap();
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0]["previewUrl"], "https://p.scdn.co/mp3-preview/1");
    assert_eq!(tracks[0]["album"]["image"], "https://i.scdn.co/image/large");
    assert_eq!(tracks[0]["externalUrl"], "https://open.spotify.com/track/track-1");
    assert_eq!(tracks[1]["previewUrl"], Value::Null);
    assert_eq!(tracks[1]["album"]["image"], Value::Null);
    assert!(tracks[1].get("externalUrl").is_none());
}

#[tokio::test]
async fn test_mood_playlist_defaults_and_genre_override() {
    let api = TestApi::authed().await;
    let (status, body) = api.get("/api/mood-playlist?mood=angry&genres=metal,%20,punk").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mood"], "happy");

    let state = api.spotify.snapshot();
    assert_eq!(
        state.recommendation_requests[0]
            .params
            .get("seed_genres")
            .map(String::as_str),
        Some("metal,punk")
    );
}

#[tokio::test]
async fn test_mood_playlist_upstream_failure() {
    let api = TestApi::authed().await;
    api.spotify
        .update(|s| s.recommendations = Reply::api_error(503, "Service unavailable"));

    let (status, body) = api.get("/api/mood-playlist?mood=focus").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "error": "Unable to load recommendations from Spotify" })
    );
}

#[tokio::test]
async fn test_genres() {
    let api = TestApi::authed().await;
    let (status, body) = api.get("/api/genres").await;

    assert_eq!(status, StatusCode::OK);
    let genres = body["genres"].as_array().unwrap();
    assert!(genres.contains(&json!("metal")));
    assert!(genres.contains(&json!("r-n-b")));
}

#[tokio::test]
async fn test_save_playlist_without_tracks() {
    let api = TestApi::authed().await;
    let (status, body) = api
        .post("/api/save-playlist", json!({ "trackUris": [], "mood": "chill" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "No tracks provided to save." }));
    assert!(api.spotify.snapshot().created_playlists.is_empty());
}

#[tokio::test]
async fn test_save_playlist() {
    let api = TestApi::authed().await;
    let (status, body) = api
        .post(
            "/api/save-playlist",
            json!({
                "trackUris": ["spotify:track:track-1", "spotify:track:track-2"],
                "mood": "chill"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "playlistId": "pl-1" }));

    let state = api.spotify.snapshot();
    let (user, created) = &state.created_playlists[0];
    assert_eq!(user, "user-1");
    assert_eq!(created["public"], false);
    assert_eq!(
        created["description"],
        "Custom playlist generated from the chill preset."
    );
    assert!(
        created["name"]
            .as_str()
            .is_some_and(|n| n.starts_with("Moodwave • "))
    );
    assert_eq!(state.added_tracks[0].0, "pl-1");
}

#[tokio::test]
async fn test_save_playlist_keeps_given_name_and_description() {
    let api = TestApi::authed().await;
    let (status, _) = api
        .post(
            "/api/save-playlist",
            json!({
                "trackUris": ["spotify:track:track-1"],
                "name": "Late night",
                "description": "For the drive home"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let state = api.spotify.snapshot();
    assert_eq!(state.created_playlists[0].1["name"], "Late night");
    assert_eq!(state.created_playlists[0].1["description"], "For the drive home");
}

#[tokio::test]
async fn test_save_playlist_upstream_failure() {
    let api = TestApi::authed().await;
    api.spotify
        .update(|s| s.create_playlist = Reply::api_error(403, "Insufficient client scope"));

    let (status, body) = api
        .post("/api/save-playlist", json!({ "trackUris": ["spotify:track:track-1"] }))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Spotify playlist creation failed." }));
}
