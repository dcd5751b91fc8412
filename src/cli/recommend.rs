use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    cli::{playlist, session},
    error, info, moods,
    spotify::genres,
    utils, warning,
};

pub struct RecommendOptions {
    pub mood: Option<String>,
    pub genres: Option<String>,
    pub save: bool,
    pub name: Option<String>,
    pub open: bool,
}

pub async fn recommend(opts: RecommendOptions) {
    let (client, credential) = session().await;

    let custom_genres = utils::parse_genres(opts.genres.as_deref());
    for genre in custom_genres.iter().flatten() {
        if !genres::is_known_genre(genre) {
            warning!("'{}' is not a known genre seed, see moodwave genres", genre);
        }
    }
    let mood = moods::resolve(opts.mood.as_deref());
    if let Some(raw) = opts.mood.as_deref() {
        if !raw.eq_ignore_ascii_case(mood.as_str()) {
            warning!("Unknown mood '{}', using '{}'", raw, mood);
        }
    }

    let pb = ProgressBar::new_spinner();
    pb.set_message(format!("Fetching {} recommendations...", mood));
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = client
        .recommendations_for_mood(&credential, Some(mood.as_str()), custom_genres.as_deref())
        .await;
    pb.finish_and_clear();

    let recommendations = match result {
        Ok(r) => r,
        Err(e) => error!("Unable to load recommendations from Spotify. Err: {}", e),
    };

    if recommendations.tracks.is_empty() {
        warning!("Spotify returned no tracks for mood {}", recommendations.mood);
        return;
    }

    let preset = moods::lookup(recommendations.mood);
    info!(
        "{} • {} tracks",
        preset.label,
        recommendations.tracks.len()
    );
    let rows: Vec<_> = recommendations
        .tracks
        .iter()
        .map(utils::track_table_row)
        .collect();
    println!("{}", Table::new(rows));

    if opts.save {
        playlist::save(
            &client,
            &credential,
            &recommendations,
            opts.name,
            opts.open,
        )
        .await;
    }
}
