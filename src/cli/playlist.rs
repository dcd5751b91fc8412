use chrono::Local;

use crate::{
    error, info,
    spotify::SpotifyClient,
    success,
    types::{Credential, MoodRecommendations, PlaylistOptions},
    utils, warning,
};

pub async fn save(
    client: &SpotifyClient,
    credential: &Credential,
    recommendations: &MoodRecommendations,
    name: Option<String>,
    open: bool,
) {
    let name = name.unwrap_or_else(|| utils::default_playlist_name(Local::now().date_naive()));
    info!("Create playlist {}", name);

    let options = PlaylistOptions {
        name: name.clone(),
        description: Some(utils::default_playlist_description(Some(
            recommendations.mood.as_str(),
        ))),
        track_uris: utils::track_uris(&recommendations.tracks),
        public: false,
    };

    let playlist_id = match client.create_playlist_with_tracks(credential, options).await {
        Ok(id) => id,
        Err(e) => error!("Spotify playlist creation failed. Err: {}", e),
    };
    success!("Playlist {} saved with {} tracks.", name, recommendations.tracks.len());

    let url = utils::playlist_web_url(&playlist_id);
    if open {
        if webbrowser::open(&url).is_err() {
            warning!("Failed to open browser. Open the playlist manually:\n{}", url)
        }
    } else {
        info!("{}", url);
    }
}
