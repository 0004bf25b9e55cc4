//! The generate, create, search and add sequence behind both surfaces.

use std::{collections::HashSet, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Error, Res,
    config::Settings,
    llm::LlmClient,
    management::TokenManager,
    mood::PlaylistRequest,
    spotify::SpotifyClient,
    types::{GeneratedPlaylist, MatchedSong, PlaylistDescriptor, PlaylistOutcome, UnmatchedSong},
};

pub struct PlaylistPipeline {
    spotify: SpotifyClient,
    llm: LlmClient,
    default_user: Option<String>,
    show_progress: bool,
}

impl PlaylistPipeline {
    pub fn new(settings: &Settings) -> Self {
        Self {
            spotify: SpotifyClient::new(settings.spotify.api_url.clone()),
            llm: LlmClient::new(settings.llm.clone()),
            default_user: settings.spotify.user_id.clone(),
            show_progress: false,
        }
    }

    /// Shows a terminal spinner while songs are searched.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Runs the whole sequence for one validated request.
    ///
    /// 1. Songs come from the request or from the language model
    /// 2. The playlist is created; a failure here ends the run
    /// 3. Each song is searched, one call after the other
    /// 4. Matched tracks are added, if there is at least one
    ///
    /// Songs without a catalog match, or whose search failed, end up in
    /// [`PlaylistOutcome::unmatched`] together with the search error. A
    /// rejected token (401 or 403) ends the run with that error instead.
    pub async fn run(
        &self,
        request: &PlaylistRequest,
        tokens: &mut TokenManager,
    ) -> Res<PlaylistOutcome> {
        let generated = match &request.songs {
            Some(songs) => GeneratedPlaylist {
                songs: songs.clone(),
                ..Default::default()
            },
            None => self.llm.generate(request).await?,
        };

        let descriptor = describe(request, &generated);

        let token = tokens.get_valid_token().await;
        let user_id = match request.user_id.as_ref().or(self.default_user.as_ref()) {
            Some(user_id) => user_id.clone(),
            None => self.spotify.current_user(&token).await?.id,
        };

        let playlist = self
            .spotify
            .create_playlist(&token, &user_id, &descriptor)
            .await?;

        let pb = self.spinner(generated.songs.len());
        let mut matched = Vec::new();
        let mut unmatched = Vec::new();

        for song in generated.songs {
            pb.set_message(format!("Searching {}", song));
            let token = tokens.get_valid_token().await;
            match self.spotify.search_track(&token, &song).await {
                Ok(Some(track)) => matched.push(MatchedSong { song, track }),
                Ok(None) => unmatched.push(UnmatchedSong { song, error: None }),
                Err(e @ Error::Api { status: 401 | 403, .. }) => {
                    pb.finish_and_clear();
                    return Err(e);
                }
                Err(e) => unmatched.push(UnmatchedSong {
                    song,
                    error: Some(e.to_string()),
                }),
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        let uris = unique_uris(&matched);
        if !uris.is_empty() {
            let token = tokens.get_valid_token().await;
            self.spotify.add_tracks(&token, &playlist.id, &uris).await?;
        }

        Ok(PlaylistOutcome {
            playlist,
            description: descriptor.description,
            matched,
            unmatched,
            added: uris.len(),
        })
    }

    fn spinner(&self, total: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total as u64);
        pb.enable_steady_tick(Duration::from_millis(100));
        if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} [{pos}/{len}] {msg}") {
            pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        pb
    }
}

/// Picks name and description: user input first, then the model's
/// suggestion, then a name built from mood and genres.
pub fn describe(request: &PlaylistRequest, generated: &GeneratedPlaylist) -> PlaylistDescriptor {
    PlaylistDescriptor {
        name: request
            .name
            .clone()
            .or_else(|| generated.name.clone())
            .unwrap_or_else(|| request.fallback_name()),
        description: request
            .description
            .clone()
            .or_else(|| generated.description.clone())
            .unwrap_or_else(|| request.fallback_description()),
        public: request.public,
    }
}

/// Track URIs of `matched` without duplicates, in first-seen order.
pub fn unique_uris(matched: &[MatchedSong]) -> Vec<String> {
    let mut seen = HashSet::new();
    matched
        .iter()
        .map(|m| m.track.uri.clone())
        .filter(|uri| seen.insert(uri.clone()))
        .collect()
}
