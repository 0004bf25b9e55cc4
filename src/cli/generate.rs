use std::{path::PathBuf, sync::Arc};

use tabled::Table;

use crate::{
    Res,
    api::pages,
    config::Settings,
    info,
    management::TokenManager,
    mood::{Mood, PlaylistRequest},
    pipeline::PlaylistPipeline,
    spotify, success,
    types::{MatchedSongTableRow, PlaylistOutcome},
    utils, warning,
};

/// Input of `moodlist generate`.
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    pub mood: Mood,
    pub genres: Vec<String>,
    pub count: u32,
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub public: bool,
    pub songs_file: Option<PathBuf>,
}

impl GenerateArgs {
    pub async fn into_request(self) -> Res<PlaylistRequest> {
        let mut request = PlaylistRequest::new(self.mood, self.genres);
        request.count = self.count;
        request.user_id = self.user_id;
        request.name = self.name;
        request.description = self.description;
        request.public = self.public;
        if let Some(path) = &self.songs_file {
            request.songs = Some(utils::read_song_file(path).await?);
        }
        request.validate()
    }
}

/// Logs in through the browser and creates one playlist.
///
/// Failures are reported as warnings; the command never aborts the process.
pub async fn generate(settings: Settings, args: GenerateArgs) {
    let request = match args.into_request().await {
        Ok(request) => request,
        Err(e) => {
            warning!("{}", e);
            return;
        }
    };

    let settings = Arc::new(settings);
    let token = match spotify::auth::login(Arc::clone(&settings)).await {
        Ok(token) => token,
        Err(e) => {
            warning!("{}", e);
            return;
        }
    };
    success!("Authentication successful!");

    match &request.songs {
        Some(songs) => info!("Using {} songs from the song list", songs.len()),
        None => info!(
            "Asking the model for {} {} songs ({})...",
            request.count,
            request.mood,
            request.genres.join(", ")
        ),
    }

    let mut tokens = TokenManager::new(token, settings.spotify.clone());
    let pipeline = PlaylistPipeline::new(&settings).with_progress(true);

    match pipeline.run(&request, &mut tokens).await {
        Ok(outcome) => report(&outcome),
        Err(e) => warning!("{}", e),
    }
}

fn report(outcome: &PlaylistOutcome) {
    success!("Playlist created: {}", outcome.playlist.name);
    if let Some(url) = &outcome.playlist.external_urls.spotify {
        info!("{}", url);
    }

    if outcome.added == 0 {
        warning!("{}", pages::empty_playlist_message(outcome));
    } else {
        let rows: Vec<MatchedSongTableRow> = outcome
            .matched
            .iter()
            .map(|m| MatchedSongTableRow {
                requested: m.song.to_string(),
                title: m.track.name.clone(),
                artists: m.track.artist_names(),
            })
            .collect();

        success!("{} songs added", outcome.added);
        println!("{}", Table::new(rows));
    }

    for unmatched in &outcome.unmatched {
        match &unmatched.error {
            Some(error) => warning!("Search failed for {}: {}", unmatched.song, error),
            None => warning!("Not found: {}", unmatched.song),
        }
    }
}
