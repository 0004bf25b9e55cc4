//! Error type shared by every moodlist operation.
//!
//! Each variant renders a message that can be shown to the user as is, both in
//! the terminal and on the web form.

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Missing or malformed configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP transport failed (connection, TLS, body decoding)
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Remote API answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Login or token exchange failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The language model answer could not be turned into a song list
    #[error("Could not read the generated song list: {0}")]
    ModelOutput(String),

    #[error("Could not create the playlist: {0}")]
    PlaylistCreation(String),

    #[error("Could not add the songs to the playlist: {0}")]
    AddTracks(String),

    /// User input rejected before any remote call
    #[error("{0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Builds an [`Error::Api`] from a failed response, consuming its body.
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Error::Api {
            status,
            message: api_error_message(&body),
        }
    }
}

/// Extracts the human readable part of an error body.
///
/// Spotify answers `{"error": {"status": 400, "message": "..."}}` on the Web API
/// and `{"error": "...", "error_description": "..."}` on the accounts service;
/// chat completion endpoints use `{"error": {"message": "..."}}`.
pub fn api_error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };

    if let Some(message) = json["error"]["message"].as_str() {
        return message.to_string();
    }
    if let Some(description) = json["error_description"].as_str() {
        return description.to_string();
    }
    if let Some(error) = json["error"].as_str() {
        return error.to_string();
    }

    body.trim().to_string()
}
