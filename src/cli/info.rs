use tabled::Table;

use crate::{
    mood::{GENRES, Mood},
    types::{GenreTableRow, MoodTableRow},
};

/// Prints the supported moods and the suggested genres. Both tables are shown
/// when neither flag is set.
pub async fn info(moods: bool, genres: bool) {
    let all = !moods && !genres;

    if moods || all {
        let rows: Vec<MoodTableRow> = Mood::ALL
            .iter()
            .map(|m| MoodTableRow {
                mood: m.label().to_string(),
                description: m.hint().to_string(),
            })
            .collect();
        println!("{}\n", Table::new(rows));
    }

    if genres || all {
        let rows: Vec<GenreTableRow> = GENRES
            .iter()
            .map(|g| GenreTableRow {
                genre: g.to_string(),
            })
            .collect();
        println!("{}\n", Table::new(rows));
    }
}
