use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{
    Error, Res,
    api::{self, web::AppState},
    config::Settings,
    types::PendingLogin,
};

fn parse_addr(address: &str) -> Res<SocketAddr> {
    SocketAddr::from_str(address)
        .map_err(|e| Error::Config(format!("invalid server address {}: {}", address, e)))
}

/// Binds the listener of the one-shot login callback on `SERVER_ADDRESS`.
pub async fn bind_callback_listener(settings: &Settings) -> Res<TcpListener> {
    let addr = parse_addr(&settings.server_address)?;
    Ok(TcpListener::bind(&addr).await?)
}

/// Serves the one-shot login callback used by `moodlist generate`.
pub async fn start_callback_server(
    listener: TcpListener,
    settings: Arc<Settings>,
    state: Arc<Mutex<Option<PendingLogin>>>,
) -> Res<()> {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .layer(Extension(state))
        .layer(Extension(settings));

    axum::serve(listener, app).await?;
    Ok(())
}

/// Router of the web form.
pub fn web_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::web::index))
        .route("/login", get(api::web::login))
        .route("/callback", get(api::web::callback))
        .route("/logout", get(api::web::logout))
        .route("/generate", post(api::web::generate))
        .route("/health", get(api::health))
        .with_state(state)
}

/// Serves the web form on `address` until the process ends.
pub async fn serve_web(settings: Settings, address: &str) -> Res<()> {
    let addr = parse_addr(address)?;
    let app = web_router(AppState::new(settings));

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
