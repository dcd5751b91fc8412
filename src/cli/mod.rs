//! # CLI Module
//!
//! User-facing commands of the `moodwave` binary. Each command builds a
//! [`SpotifyClient`] from the environment, resolves the stored credential
//! through [`CredentialStore`], and prints results with the crate's coloured
//! output macros.
//!
//! ## Commands
//!
//! - [`auth`] - capture a refresh token and validate it
//! - [`list_moods`] - show the mood catalog
//! - [`list_genres`] - show valid genre seeds
//! - [`recommend`] - fetch recommendations for a mood, optionally save them
//! - [`serve`] - run the local HTTP API
//!
//! ```bash
//! moodwave auth --refresh-token AQD...
//! moodwave recommend --mood chill
//! moodwave recommend --mood happy --genres metal,punk --save --open
//! ```
//!
//! Fatal problems (missing configuration, no credential, a credential that
//! needs a new sign-in) end the process through `error!`.

mod auth;
mod genres;
mod moods;
mod playlist;
mod recommend;
mod serve;

pub use auth::auth;
pub use genres::list_genres;
pub use moods::list_moods;
pub use recommend::{RecommendOptions, recommend};
pub use serve::serve;

use crate::{
    config::SpotifyConfig, error, management::CredentialStore, spotify::SpotifyClient,
    types::Credential,
};

pub(crate) fn spotify_client() -> SpotifyClient {
    match SpotifyConfig::from_env() {
        Ok(config) => SpotifyClient::new(config),
        Err(e) => error!("Invalid configuration. Err: {}", e),
    }
}

/// Client plus a credential that is valid right now, refreshing it if needed.
pub(crate) async fn session() -> (SpotifyClient, Credential) {
    let client = spotify_client();
    let mut store = match CredentialStore::new().load().await {
        Ok(store) => store,
        Err(e) => error!("Failed to load credential. Please run moodwave auth\n Error: {}", e),
    };

    match store.session(&client).await {
        Ok(credential) => (client, credential),
        Err(e) => error!("{}", e),
    }
}
