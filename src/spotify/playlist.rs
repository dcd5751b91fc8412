use serde_json::Value;
use tracing::debug;

use crate::{
    error::Result,
    types::{
        AddTrackToPlaylistRequest, CreatePlaylistRequest, CreatePlaylistResponse, Credential,
        PlaylistOptions, UserProfile,
    },
};

use super::SpotifyClient;

pub const DEFAULT_DESCRIPTION: &str = "Generated with Moodwave";

impl SpotifyClient {
    /// `GET /me`, the account playlists get created under.
    pub async fn current_user_profile(&self, credential: &Credential) -> Result<UserProfile> {
        self.get(credential, "/me", &[]).await
    }

    /// Creates a playlist under the current user and fills it with
    /// `options.track_uris`. Tracks are only posted when there are any.
    ///
    /// # Arguments
    ///
    /// * `credential` - Credential with the `playlist-modify-private` scope
    /// * `options` - Name, description, visibility and the track URIs to add.
    ///   A missing description becomes [`DEFAULT_DESCRIPTION`].
    ///
    /// # Returns
    ///
    /// The new playlist's id.
    ///
    /// # Errors
    ///
    /// The first failing upstream call is returned. A failure while adding
    /// tracks leaves the already created, empty playlist in place.
    pub async fn create_playlist_with_tracks(
        &self,
        credential: &Credential,
        options: PlaylistOptions,
    ) -> Result<String> {
        let profile = self.current_user_profile(credential).await?;

        let body = CreatePlaylistRequest {
            name: options.name,
            description: options
                .description
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            public: options.public,
        };
        let playlist: CreatePlaylistResponse = self
            .post(credential, &format!("/users/{}/playlists", profile.id), &body)
            .await?;
        debug!(playlist = %playlist.id, user = %profile.id, "playlist created");

        if !options.track_uris.is_empty() {
            let _: Value = self
                .post(
                    credential,
                    &format!("/playlists/{}/tracks", playlist.id),
                    &AddTrackToPlaylistRequest {
                        uris: options.track_uris,
                    },
                )
                .await?;
        }

        Ok(playlist.id)
    }
}
