use tabled::Table;

use crate::{moods, types::MoodTableRow};

pub fn list_moods() {
    let rows: Vec<MoodTableRow> = moods::all()
        .iter()
        .map(|p| MoodTableRow {
            key: p.key.to_string(),
            label: p.label.to_string(),
            description: p.description.to_string(),
            genres: p.seed_genres.join(","),
        })
        .collect();

    println!("{}", Table::new(rows));
}
