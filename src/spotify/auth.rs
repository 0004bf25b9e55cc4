use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, Url};
use tokio::sync::Mutex;

use crate::{
    Error, Res,
    config::{Settings, SpotifySettings},
    error::api_error_message,
    info,
    server::{bind_callback_listener, start_callback_server},
    types::{PendingLogin, Token, TokenResponse},
    utils, warning,
};

const LOGIN_TIMEOUT: Duration = Duration::from_secs(120);

/// Starts a login: a fresh `state` value and, when no client secret is
/// configured, a PKCE code verifier.
pub fn begin_login(settings: &SpotifySettings) -> PendingLogin {
    let code_verifier = settings
        .client_secret
        .is_none()
        .then(utils::generate_code_verifier);

    PendingLogin {
        state: utils::generate_state(),
        code_verifier,
        token: None,
        error: None,
    }
}

/// Builds the URL of the Spotify consent page for `login`.
///
/// # Errors
///
/// [`Error::Config`] when `SPOTIFY_AUTH_URL` is not a valid URL.
pub fn authorize_url(settings: &SpotifySettings, login: &PendingLogin) -> Res<String> {
    let mut params = vec![
        ("client_id", settings.client_id.clone()),
        ("response_type", "code".to_string()),
        ("redirect_uri", settings.redirect_uri.clone()),
        ("scope", settings.scope.clone()),
        ("state", login.state.clone()),
    ];

    if let Some(verifier) = &login.code_verifier {
        params.push(("code_challenge", utils::generate_code_challenge(verifier)));
        params.push(("code_challenge_method", "S256".to_string()));
    }

    let url = Url::parse_with_params(&settings.auth_url, &params)
        .map_err(|e| Error::Config(format!("invalid SPOTIFY_AUTH_URL: {}", e)))?;
    Ok(url.to_string())
}

/// Exchanges an authorization code for a token.
///
/// Sends the client secret when one is configured, the PKCE `verifier`
/// otherwise.
pub async fn exchange_code(
    settings: &SpotifySettings,
    code: &str,
    verifier: Option<&str>,
) -> Res<Token> {
    let mut form = vec![
        ("grant_type", "authorization_code"),
        ("code", code),
        ("redirect_uri", settings.redirect_uri.as_str()),
        ("client_id", settings.client_id.as_str()),
    ];

    match (&settings.client_secret, verifier) {
        (Some(secret), _) => form.push(("client_secret", secret.as_str())),
        (None, Some(verifier)) => form.push(("code_verifier", verifier)),
        (None, None) => {
            return Err(Error::Auth(
                "no client secret configured and no PKCE verifier available".to_string(),
            ));
        }
    }

    request_token(settings, &form, None).await
}

/// Exchanges a refresh token for a new access token.
///
/// Spotify may omit the refresh token in the reply; the previous one is kept
/// in that case.
pub async fn refresh_token(settings: &SpotifySettings, refresh_token: &str) -> Res<Token> {
    let mut form = vec![
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
        ("client_id", settings.client_id.as_str()),
    ];
    if let Some(secret) = &settings.client_secret {
        form.push(("client_secret", secret.as_str()));
    }

    request_token(settings, &form, Some(refresh_token)).await
}

async fn request_token(
    settings: &SpotifySettings,
    form: &[(&str, &str)],
    previous_refresh_token: Option<&str>,
) -> Res<Token> {
    let client = Client::new();
    let response = client.post(&settings.token_url).form(form).send().await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(Error::Auth(api_error_message(&body)));
    }

    let json: TokenResponse = serde_json::from_str(&body)
        .map_err(|e| Error::Auth(format!("unexpected token response: {}", e)))?;

    let Some(access_token) = json.access_token else {
        let reason = json
            .error_description
            .or(json.error)
            .unwrap_or_else(|| "no access token in response".to_string());
        return Err(Error::Auth(reason));
    };

    Ok(Token {
        access_token,
        refresh_token: json
            .refresh_token
            .or_else(|| previous_refresh_token.map(str::to_string)),
        scope: json.scope.unwrap_or_default(),
        expires_in: json.expires_in.unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}

/// Runs the interactive browser login used by the command line.
///
/// 1. Starts the one-shot callback server on `SERVER_ADDRESS`; a failed bind
///    is returned right away
/// 2. Opens the consent page in the default browser (or prints the URL)
/// 3. Waits up to two minutes for the callback to deliver a token
pub async fn login(settings: Arc<Settings>) -> Res<Token> {
    let login = begin_login(&settings.spotify);
    let auth_url = authorize_url(&settings.spotify, &login)?;

    let listener = bind_callback_listener(&settings).await?;
    let shared_state = Arc::new(Mutex::new(Some(login)));

    let server_state = Arc::clone(&shared_state);
    let server_settings = Arc::clone(&settings);
    let server = tokio::spawn(async move {
        if let Err(e) = start_callback_server(listener, server_settings, server_state).await {
            warning!("Login callback server stopped: {}", e);
        }
    });

    info!("Waiting for Spotify login...");
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let result = wait_for_token(shared_state).await;
    server.abort();
    result
}

async fn wait_for_token(shared_state: Arc<Mutex<Option<PendingLogin>>>) -> Res<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < LOGIN_TIMEOUT {
        let lock = shared_state.lock().await;
        if let Some(login) = lock.as_ref() {
            if let Some(token) = &login.token {
                return Ok(token.clone());
            }
            if let Some(error) = &login.error {
                return Err(Error::Auth(error.clone()));
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    Err(Error::Auth("login timed out".to_string()))
}
