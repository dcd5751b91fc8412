use axum::{Extension, Json, extract::Query};
use serde::Deserialize;
use tracing::error;

use crate::{types::MoodRecommendations, utils};

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub struct MoodPlaylistParams {
    pub mood: Option<String>,
    pub genres: Option<String>,
}

pub async fn mood_playlist(
    Query(params): Query<MoodPlaylistParams>,
    Extension(state): Extension<AppState>,
) -> Result<Json<MoodRecommendations>, ApiError> {
    let credential = state.session().await?;
    let custom_genres = utils::parse_genres(params.genres.as_deref());

    state
        .client
        .recommendations_for_mood(&credential, params.mood.as_deref(), custom_genres.as_deref())
        .await
        .map(Json)
        .map_err(|e| {
            error!(error = %e, "failed to fetch recommendations");
            if e.is_unauthorized() {
                ApiError::Unauthorized
            } else {
                ApiError::Internal("Unable to load recommendations from Spotify")
            }
        })
}
