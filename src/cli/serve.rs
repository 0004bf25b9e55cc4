use crate::{config::Settings, info, server, warning};

/// Runs the web form until the process is stopped.
pub async fn serve(settings: Settings, address: Option<String>) {
    let address = address.unwrap_or_else(|| settings.server_address.clone());

    if !settings.spotify.redirect_uri.contains(&address) {
        warning!(
            "SPOTIFY_REDIRECT_URI ({}) does not point to {}, logins will not come back here.",
            settings.spotify.redirect_uri,
            address
        );
    }

    info!("Serving moodlist on http://{}", address);
    if let Err(e) = server::serve_web(settings, &address).await {
        warning!("Server stopped: {}", e);
    }
}
