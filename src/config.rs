//! Configuration management for moodlist.
//!
//! Configuration comes from environment variables, which may be provided by
//! `.env` files. The lookup order is:
//! 1. Environment variables of the process (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the current working directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::{Error, Res};

pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8501/callback";
pub const DEFAULT_SCOPE: &str = "playlist-modify-private playlist-modify-public";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_LLM_API_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8501";

/// Loads environment variables from `.env` files.
///
/// Creates the local data directory if needed and loads the `.env` located in:
/// - Linux: `~/.local/share/moodlist/.env`
/// - macOS: `~/Library/Application Support/moodlist/.env`
/// - Windows: `%LOCALAPPDATA%/moodlist/.env`
///
/// A `.env` in the working directory is loaded afterwards. `dotenv` never
/// overrides variables that are already set, so the process environment wins
/// and the data directory file wins over the working directory one.
///
/// Missing files are not an error; an unreadable or malformed file is.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(dotenv::Error::Io(_)) => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

/// Location of the `.env` file inside the local data directory.
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("moodlist/.env");
    path
}

/// Spotify application and endpoint settings.
#[derive(Debug, Clone)]
pub struct SpotifySettings {
    pub client_id: String,
    /// When absent, logins use the PKCE variant of the authorization-code flow.
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    /// Default owner of created playlists.
    pub user_id: Option<String>,
}

/// Chat completion endpoint settings.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
}

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub spotify: SpotifySettings,
    pub llm: LlmSettings,
    pub server_address: String,
}

impl Settings {
    /// Reads all settings from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first missing required variable
    /// (`SPOTIFY_CLIENT_ID` or `OPENAI_API_KEY`).
    pub fn from_env() -> Res<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through an arbitrary lookup function.
    ///
    /// Empty values count as missing, so a copied `.env.example` with blank
    /// entries falls back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Res<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |key: &str| {
            get(key).ok_or_else(|| Error::Config(format!("{} must be set", key)))
        };
        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        Ok(Settings {
            spotify: SpotifySettings {
                client_id: required("SPOTIFY_CLIENT_ID")?,
                client_secret: get("SPOTIFY_CLIENT_SECRET"),
                redirect_uri: or_default("SPOTIFY_REDIRECT_URI", DEFAULT_REDIRECT_URI),
                scope: or_default("SPOTIFY_SCOPE", DEFAULT_SCOPE),
                auth_url: or_default("SPOTIFY_AUTH_URL", DEFAULT_AUTH_URL),
                token_url: or_default("SPOTIFY_TOKEN_URL", DEFAULT_TOKEN_URL),
                api_url: trim_slash(or_default("SPOTIFY_API_URL", DEFAULT_API_URL)),
                user_id: get("SPOTIFY_USER_ID"),
            },
            llm: LlmSettings {
                api_key: required("OPENAI_API_KEY")?,
                api_url: trim_slash(or_default("OPENAI_API_URL", DEFAULT_LLM_API_URL)),
                model: or_default("OPENAI_MODEL", DEFAULT_LLM_MODEL),
            },
            server_address: or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
        })
    }
}

fn trim_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
