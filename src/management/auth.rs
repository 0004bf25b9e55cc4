use chrono::Utc;

use crate::{config::SpotifySettings, spotify, types::Token, warning};

/// Seconds before the real expiry at which a token is treated as stale.
const EXPIRY_MARGIN_SECS: u64 = 240;

/// Holds the session token in memory and refreshes it when it goes stale.
#[derive(Debug, Clone)]
pub struct TokenManager {
    token: Token,
    settings: SpotifySettings,
}

impl TokenManager {
    pub fn new(token: Token, settings: SpotifySettings) -> Self {
        TokenManager { token, settings }
    }

    /// Returns an access token, refreshing it first when it is stale.
    ///
    /// A failed refresh keeps the current token; the next API call then
    /// reports the authentication problem to the user.
    pub async fn get_valid_token(&mut self) -> String {
        if self.is_expired() {
            if let Some(refresh) = self.token.refresh_token.clone() {
                match spotify::auth::refresh_token(&self.settings, &refresh).await {
                    Ok(new_token) => self.token = new_token,
                    Err(e) => warning!("Token refresh failed: {}", e),
                }
            }
        }

        self.token.access_token.clone()
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + EXPIRY_MARGIN_SECS >= self.token.obtained_at + self.token.expires_in
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
