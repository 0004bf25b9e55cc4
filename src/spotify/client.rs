use reqwest::Client;

use crate::{
    Error, Res,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, CurrentUser, PlaylistDescriptor, SearchResponse, Song, Track,
    },
};

/// Maximum number of URIs accepted by one add-tracks call.
pub const ADD_TRACKS_CHUNK_SIZE: usize = 100;

/// Thin client over the Spotify Web API endpoints used by moodlist.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    client: Client,
    api_url: String,
}

impl SpotifyClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Returns the profile of the logged in user (`GET /me`).
    pub async fn current_user(&self, token: &str) -> Res<CurrentUser> {
        let response = self
            .client
            .get(format!("{}/me", self.api_url))
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::from_response(response).await);
        }

        Ok(response.json::<CurrentUser>().await?)
    }

    /// Creates a playlist owned by `user_id`.
    ///
    /// # Errors
    ///
    /// [`Error::PlaylistCreation`] with the API message when Spotify refuses
    /// the request, [`Error::Request`] on transport failures.
    pub async fn create_playlist(
        &self,
        token: &str,
        user_id: &str,
        descriptor: &PlaylistDescriptor,
    ) -> Res<CreatePlaylistResponse> {
        let body = CreatePlaylistRequest {
            name: descriptor.name.clone(),
            description: descriptor.description.clone(),
            public: descriptor.public,
        };

        let response = self
            .client
            .post(format!("{}/users/{}/playlists", self.api_url, user_id))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let reason = Error::from_response(response).await;
            return Err(Error::PlaylistCreation(reason.to_string()));
        }

        Ok(response.json::<CreatePlaylistResponse>().await?)
    }

    /// Looks up the best catalog match for `song`.
    ///
    /// A fielded query (`track:<title> artist:<artist>`) runs first; when it
    /// finds nothing a plain `<title> <artist>` query is tried. `Ok(None)`
    /// means the catalog has no match.
    pub async fn search_track(&self, token: &str, song: &Song) -> Res<Option<Track>> {
        let fielded = if song.artist.is_empty() {
            format!("track:{}", song.title)
        } else {
            format!("track:{} artist:{}", song.title, song.artist)
        };

        if let Some(track) = self.search(token, &fielded).await? {
            return Ok(Some(track));
        }

        let plain = format!("{} {}", song.title, song.artist);
        self.search(token, plain.trim()).await
    }

    async fn search(&self, token: &str, query: &str) -> Res<Option<Track>> {
        let response = self
            .client
            .get(format!("{}/search", self.api_url))
            .query(&[("q", query), ("type", "track"), ("limit", "1")])
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::from_response(response).await);
        }

        let json = response.json::<SearchResponse>().await?;
        Ok(json.tracks.and_then(|t| t.items.into_iter().next()))
    }

    /// Appends `uris` to the playlist in chunks of [`ADD_TRACKS_CHUNK_SIZE`].
    ///
    /// Returns the snapshot id of the last chunk. Stops at the first chunk
    /// that fails.
    pub async fn add_tracks(
        &self,
        token: &str,
        playlist_id: &str,
        uris: &[String],
    ) -> Res<Option<String>> {
        let mut snapshot_id = None;

        for chunk in uris.chunks(ADD_TRACKS_CHUNK_SIZE) {
            let body = AddTrackToPlaylistRequest {
                uris: chunk.to_vec(),
            };

            let response = self
                .client
                .post(format!("{}/playlists/{}/tracks", self.api_url, playlist_id))
                .bearer_auth(token)
                .json(&body)
                .send()
                .await?;

            if !response.status().is_success() {
                let reason = Error::from_response(response).await;
                return Err(Error::AddTracks(reason.to_string()));
            }

            let json = response.json::<AddTrackToPlaylistResponse>().await?;
            snapshot_id = Some(json.snapshot_id);
        }

        Ok(snapshot_id)
    }
}
