//! # Spotify Integration Module
//!
//! Everything moodlist needs from Spotify: the OAuth authorization-code login
//! and the few Web API endpoints that build a playlist.
//!
//! ## Authentication
//!
//! [`auth`] implements the authorization-code flow in two variants:
//! - **Client secret**: used when `SPOTIFY_CLIENT_SECRET` is configured
//! - **PKCE**: a SHA256 code challenge replaces the secret otherwise
//!
//! Both variants send a random `state` value that the callback has to echo.
//! Tokens are kept in memory for the session only.
//!
//! ## Web API
//!
//! [`SpotifyClient`] covers:
//! - `GET /me` - default owner of new playlists
//! - `POST /users/{user_id}/playlists` - create the playlist
//! - `GET /search` - find one track per generated song
//! - `POST /playlists/{playlist_id}/tracks` - add the matches, 100 per call
//!
//! Failed calls are returned as [`crate::Error`] values and never retried.

pub mod auth;
mod client;

pub use client::{ADD_TRACKS_CHUNK_SIZE, SpotifyClient};
