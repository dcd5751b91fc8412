use axum::{Extension, Json, http::StatusCode};
use chrono::Local;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::error;

use crate::{types::PlaylistOptions, utils};

use super::{ApiError, AppState};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePlaylistBody {
    #[serde(default)]
    pub track_uris: Vec<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub mood: Option<String>,
}

pub async fn save_playlist(
    Extension(state): Extension<AppState>,
    Json(body): Json<SavePlaylistBody>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let credential = state.session().await?;

    if body.track_uris.is_empty() {
        return Err(ApiError::BadRequest("No tracks provided to save."));
    }

    let options = PlaylistOptions {
        name: body
            .name
            .unwrap_or_else(|| utils::default_playlist_name(Local::now().date_naive())),
        description: Some(
            body.description
                .unwrap_or_else(|| utils::default_playlist_description(body.mood.as_deref())),
        ),
        track_uris: body.track_uris,
        public: false,
    };

    match state
        .client
        .create_playlist_with_tracks(&credential, options)
        .await
    {
        Ok(playlist_id) => Ok((
            StatusCode::CREATED,
            Json(json!({ "playlistId": playlist_id })),
        )),
        Err(e) => {
            error!(error = %e, "unable to save playlist");
            Err(ApiError::Internal("Spotify playlist creation failed."))
        }
    }
}
