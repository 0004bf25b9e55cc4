//! # Language Model Module
//!
//! Asks an OpenAI compatible chat completion endpoint for songs and turns the
//! answer into a [`GeneratedPlaylist`].
//!
//! - [`prompt`] builds the messages from a [`PlaylistRequest`]
//! - [`parse`] cleans the answer and reads the song list out of it
//! - [`LlmClient`] performs the HTTP call

pub mod parse;
pub mod prompt;

use reqwest::Client;

use crate::{
    Error, Res,
    config::LlmSettings,
    mood::PlaylistRequest,
    types::{ChatMessage, ChatRequest, ChatResponse, GeneratedPlaylist},
};

const TEMPERATURE: f32 = 0.8;

pub struct LlmClient {
    client: Client,
    settings: LlmSettings,
}

impl LlmClient {
    pub fn new(settings: LlmSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    /// Sends `messages` to `{api_url}/chat/completions` and returns the content
    /// of the first choice.
    ///
    /// # Errors
    ///
    /// - [`Error::Request`] on transport failures
    /// - [`Error::Api`] when the endpoint answers with a non-success status
    /// - [`Error::ModelOutput`] when the answer has no choice or an empty one
    pub async fn complete(&self, messages: Vec<ChatMessage>) -> Res<String> {
        let body = ChatRequest {
            model: self.settings.model.clone(),
            messages,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.settings.api_url))
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::from_response(response).await);
        }

        let chat = response.json::<ChatResponse>().await?;
        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| Error::ModelOutput("the model returned no answer".to_string()))
    }

    /// Asks the model for the songs of `request` and parses the answer.
    pub async fn generate(&self, request: &PlaylistRequest) -> Res<GeneratedPlaylist> {
        let answer = self.complete(prompt::build(request)).await?;
        let mut generated = parse::parse_generated(&answer)?;
        generated.songs.truncate(request.count as usize);
        Ok(generated)
    }
}
