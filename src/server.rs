use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::{net::SocketAddr, str::FromStr};
use tracing::info;

use crate::{api, api::AppState};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/api/moods", get(api::moods))
        .route("/api/mood-playlist", get(api::mood_playlist))
        .route("/api/genres", get(api::genres))
        .route("/api/save-playlist", post(api::save_playlist))
        .layer(Extension(state))
}

/// Binds `address` and serves the API until the process stops.
pub async fn start_api_server(address: &str, state: AppState) -> crate::Res<()> {
    let addr = SocketAddr::from_str(address)
        .map_err(|e| format!("Failed to parse server address {address}: {e}"))?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "moodwave api listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
