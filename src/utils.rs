use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::NaiveDate;

use crate::types::{SimplifiedTrack, TrackTableRow};

/// Base64 of `client_id:client_secret`, the credential part of a Basic
/// `Authorization` header.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    STANDARD.encode(format!("{client_id}:{client_secret}"))
}

/// Splits a comma separated genre list. Blank entries are dropped, `None`
/// when nothing is left.
pub fn parse_genres(raw: Option<&str>) -> Option<Vec<String>> {
    let genres: Vec<String> = raw?
        .split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect();

    if genres.is_empty() { None } else { Some(genres) }
}

pub fn default_playlist_name(date: NaiveDate) -> String {
    format!("Moodwave • {}", date.format("%Y-%m-%d"))
}

pub fn default_playlist_description(mood: Option<&str>) -> String {
    format!(
        "Custom playlist generated from the {} preset.",
        mood.filter(|m| !m.is_empty()).unwrap_or("mood")
    )
}

pub fn track_uris(tracks: &[SimplifiedTrack]) -> Vec<String> {
    tracks.iter().map(|t| t.uri.clone()).collect()
}

pub fn playlist_web_url(playlist_id: &str) -> String {
    format!("https://open.spotify.com/playlist/{playlist_id}")
}

pub fn track_table_row(track: &SimplifiedTrack) -> TrackTableRow {
    TrackTableRow {
        name: track.name.clone(),
        artists: track
            .artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        album: track.album.name.clone(),
        preview: if track.preview_url.is_some() {
            "yes".to_string()
        } else {
            "-".to_string()
        },
    }
}
