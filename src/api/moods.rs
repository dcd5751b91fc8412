use axum::Json;
use serde_json::{Value, json};

use crate::moods;

pub async fn moods() -> Json<Value> {
    Json(json!({ "moods": moods::all(), "default": moods::DEFAULT_MOOD }))
}
