//! # API Module
//!
//! Thin HTTP handlers served by `moodwave serve`. They resolve the session
//! credential through the shared [`CredentialStore`], call into
//! [`crate::spotify`], and translate failures into JSON error bodies.
//!
//! ## Endpoints
//!
//! - `GET /health` - status and version
//! - `GET /api/moods` - the mood catalog
//! - `GET /api/mood-playlist?mood=&genres=` - mood-filtered recommendations
//! - `GET /api/genres` - valid genre seeds
//! - `POST /api/save-playlist` - persist tracks as a new private playlist
//!
//! A missing or unrefreshable credential answers 401; upstream failures
//! answer 500.

mod error;
mod genres;
mod health;
mod mood_playlist;
mod moods;
mod save_playlist;

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::error;

use crate::{management::CredentialStore, spotify::SpotifyClient, types::Credential};

pub use error::ApiError;
pub use genres::genres;
pub use health::health;
pub use mood_playlist::{MoodPlaylistParams, mood_playlist};
pub use moods::moods;
pub use save_playlist::{SavePlaylistBody, save_playlist};

/// Shared by every handler. The store is locked for the duration of a
/// session lookup so concurrent requests don't refresh twice.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<SpotifyClient>,
    pub store: Arc<Mutex<CredentialStore>>,
}

impl AppState {
    pub fn new(client: SpotifyClient, store: CredentialStore) -> Self {
        Self {
            client: Arc::new(client),
            store: Arc::new(Mutex::new(store)),
        }
    }

    pub(crate) async fn session(&self) -> Result<Credential, ApiError> {
        let mut store = self.store.lock().await;
        store.session(&self.client).await.map_err(|e| {
            if e.is_unauthorized() {
                ApiError::Unauthorized
            } else {
                error!(error = %e, "unable to resolve session credential");
                ApiError::Internal("Unable to load session")
            }
        })
    }
}
