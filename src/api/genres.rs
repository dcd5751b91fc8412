use axum::{Extension, Json};
use serde_json::{Value, json};

use crate::spotify::genres::available_genre_seeds;

use super::{ApiError, AppState};

pub async fn genres(Extension(state): Extension<AppState>) -> Result<Json<Value>, ApiError> {
    state.session().await?;
    Ok(Json(json!({ "genres": available_genre_seeds() })))
}
