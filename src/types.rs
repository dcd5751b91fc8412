use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::moods::MoodKey;

/// Marker stored on a credential whose last refresh failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialError {
    RefreshAccessTokenError,
}

/// One user's authorization state against Spotify.
///
/// `access_token_expires` is an absolute timestamp in milliseconds since the
/// Unix epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub access_token_expires: i64,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<CredentialError>,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl Credential {
    /// Captures a credential right after the initial authorization.
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_in: i64,
        scope: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            access_token_expires: now
                .timestamp_millis()
                .saturating_add(expires_in.saturating_mul(1000)),
            refresh_token: refresh_token.into(),
            token_type: default_token_type(),
            scope: scope.into(),
            error: None,
        }
    }

    /// A credential that only knows its refresh token. It is expired from the
    /// start, so the first session refreshes it.
    pub fn from_refresh_token(refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: String::new(),
            access_token_expires: 0,
            refresh_token: refresh_token.into(),
            token_type: default_token_type(),
            scope: String::new(),
            error: None,
        }
    }

    /// Copy of `self` tagged as failed; every other field is kept.
    pub fn with_error(&self, error: CredentialError) -> Self {
        Self {
            error: Some(error),
            ..self.clone()
        }
    }

    pub fn needs_reauth(&self) -> bool {
        self.error.is_some()
    }
}

/// Body of a successful `POST /api/token` refresh.
///
/// `expires_in` is taken as any JSON number, `3600` and `3600.0` alike.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub expires_in: Option<f64>,
    pub refresh_token: Option<String>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
}

/// Spotify's error envelope: `{"error": {"status": 404, "message": "..."}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    pub status: u16,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopItemsResponse {
    pub items: Vec<TopItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopItem {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationsResponse {
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub external_urls: Option<ExternalUrls>,
    #[serde(default)]
    pub artists: Vec<SimplifiedArtist>,
    pub album: Album,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifiedArtist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifiedAlbum {
    pub id: String,
    pub name: String,
    pub image: Option<String>,
}

/// The normalized, UI-ready track. `preview_url` is frequently `None`, which
/// means "preview unavailable".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedTrack {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub preview_url: Option<String>,
    pub album: SimplifiedAlbum,
    pub artists: Vec<SimplifiedArtist>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
}

impl From<Track> for SimplifiedTrack {
    fn from(track: Track) -> Self {
        let image = track.album.images.into_iter().next().map(|i| i.url);
        Self {
            id: track.id,
            name: track.name,
            uri: track.uri,
            preview_url: track.preview_url,
            album: SimplifiedAlbum {
                id: track.album.id,
                name: track.album.name,
                image,
            },
            artists: track.artists,
            external_url: track.external_urls.and_then(|u| u.spotify),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodRecommendations {
    pub mood: MoodKey,
    pub tracks: Vec<SimplifiedTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

/// Input to [`crate::spotify::SpotifyClient::create_playlist_with_tracks`].
#[derive(Debug, Clone)]
pub struct PlaylistOptions {
    pub name: String,
    pub description: Option<String>,
    pub track_uris: Vec<String>,
    pub public: bool,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub name: String,
    pub artists: String,
    pub album: String,
    pub preview: String,
}

#[derive(Tabled)]
pub struct MoodTableRow {
    pub key: String,
    pub label: String,
    pub description: String,
    pub genres: String,
}
