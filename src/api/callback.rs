use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{
    Error, Res,
    config::{Settings, SpotifySettings},
    spotify,
    types::{PendingLogin, Token},
    warning,
};

/// Callback of the one-shot login server started by the command line.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(settings): Extension<Arc<Settings>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<PendingLogin>>>>,
) -> Html<&'static str> {
    let Some(pending) = shared_state.lock().await.clone() else {
        return Html("<h4>No login in progress.</h4>");
    };

    let result = complete_login(&settings.spotify, &pending, &params).await;

    let mut state = shared_state.lock().await;
    let Some(login) = state.as_mut() else {
        return Html("<h4>No login in progress.</h4>");
    };

    match result {
        Ok(token) => {
            login.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>You can close this browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            login.error = Some(e.to_string());
            Html("<h4>Login failed.</h4><p>See the terminal for details.</p>")
        }
    }
}

/// Validates the query of an OAuth callback against `login` and exchanges the
/// authorization code.
///
/// # Errors
///
/// [`Error::Auth`] when Spotify reports an error, the `state` does not match,
/// the code is missing or the token exchange fails.
pub async fn complete_login(
    settings: &SpotifySettings,
    login: &PendingLogin,
    params: &HashMap<String, String>,
) -> Res<Token> {
    if let Some(error) = params.get("error") {
        return Err(Error::Auth(format!("Spotify refused the login ({})", error)));
    }

    if params.get("state") != Some(&login.state) {
        return Err(Error::Auth(
            "the login answer does not belong to this session".to_string(),
        ));
    }

    let Some(code) = params.get("code") else {
        return Err(Error::Auth("missing authorization code".to_string()));
    };

    spotify::auth::exchange_code(settings, code, login.code_verifier.as_deref()).await
}
