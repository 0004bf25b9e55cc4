use std::{collections::HashMap, sync::Arc};

use axum::{
    Form,
    extract::{Query, State},
    http::{HeaderMap, header},
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::{
    Error, Res,
    api::{
        callback::complete_login,
        pages::{self, NoticeKind},
    },
    config::Settings,
    llm::parse,
    management::{SESSION_COOKIE, SessionStore, TokenManager},
    mood::{DEFAULT_SONG_COUNT, Mood, PlaylistRequest},
    pipeline::PlaylistPipeline,
    spotify, utils,
};

/// Shared state of the web form handlers.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub sessions: SessionStore,
    pub pipeline: Arc<PlaylistPipeline>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let pipeline = PlaylistPipeline::new(&settings);
        Self {
            settings: Arc::new(settings),
            sessions: SessionStore::new(),
            pipeline: Arc::new(pipeline),
        }
    }

    /// Id of the live session named by the request cookie, if any.
    async fn session_id(&self, headers: &HeaderMap) -> Option<String> {
        let cookie = headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| utils::cookie_value(v, SESSION_COOKIE));
        self.sessions.touch(cookie).await
    }
}

fn with_session_cookie(session_id: &str, response: impl IntoResponse) -> Response {
    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, session_id
    );
    ([(header::SET_COOKIE, cookie)], response).into_response()
}

fn without_session_cookie(response: impl IntoResponse) -> Response {
    let cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE
    );
    ([(header::SET_COOKIE, cookie)], response).into_response()
}

/// `GET /`: login link or playlist form.
pub async fn index(State(app): State<AppState>, headers: HeaderMap) -> Response {
    let Some(id) = app.session_id(&headers).await else {
        return Html(pages::index(false, &[])).into_response();
    };

    let authenticated = app
        .sessions
        .get(&id)
        .await
        .is_some_and(|s| s.is_authenticated());

    with_session_cookie(&id, Html(pages::index(authenticated, &[])))
}

/// `GET /login`: remembers a fresh OAuth state and redirects to Spotify.
///
/// This is the only handler that starts a session.
pub async fn login(State(app): State<AppState>, headers: HeaderMap) -> Response {
    let login = spotify::auth::begin_login(&app.settings.spotify);

    let url = match spotify::auth::authorize_url(&app.settings.spotify, &login) {
        Ok(url) => url,
        Err(e) => return Html(pages::message(NoticeKind::Error, &e.to_string())).into_response(),
    };

    let id = match app.session_id(&headers).await {
        Some(id) => id,
        None => app.sessions.create().await,
    };

    app.sessions.update(&id, |s| s.login = Some(login)).await;
    with_session_cookie(&id, Redirect::to(&url))
}

/// `GET /callback`: finishes the login of the current session.
pub async fn callback(
    State(app): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let id = app.session_id(&headers).await;
    let pending = match &id {
        Some(id) => app.sessions.update(id, |s| s.login.take()).await.flatten(),
        None => None,
    };

    let (Some(id), Some(pending)) = (id, pending) else {
        let page = pages::index(
            false,
            &[(
                NoticeKind::Error,
                "Authentication failed: no login in progress for this browser.".to_string(),
            )],
        );
        return Html(page).into_response();
    };

    match complete_login(&app.settings.spotify, &pending, &params).await {
        Ok(token) => {
            let manager = TokenManager::new(token, app.settings.spotify.clone());
            app.sessions.update(&id, |s| s.tokens = Some(manager)).await;
            with_session_cookie(&id, Redirect::to("/"))
        }
        Err(e) => {
            let page = pages::index(false, &[(NoticeKind::Error, e.to_string())]);
            with_session_cookie(&id, Html(page))
        }
    }
}

/// `GET /logout`: forgets the session and clears its cookie.
pub async fn logout(State(app): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(id) = app.session_id(&headers).await {
        app.sessions.remove(&id).await;
    }
    without_session_cookie(Redirect::to("/"))
}

/// `POST /generate`: runs the pipeline for the submitted form.
pub async fn generate(
    State(app): State<AppState>,
    headers: HeaderMap,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    let id = app.session_id(&headers).await;
    let tokens = match &id {
        Some(id) => app.sessions.get(id).await.and_then(|s| s.tokens),
        None => None,
    };

    let (Some(id), Some(mut tokens)) = (id, tokens) else {
        let page = pages::index(
            false,
            &[(NoticeKind::Warning, "Please log in with Spotify first.".to_string())],
        );
        return Html(page).into_response();
    };

    let request = match request_from_form(&fields) {
        Ok(request) => request,
        Err(e) => {
            let page = pages::index(true, &[(NoticeKind::Warning, e.to_string())]);
            return with_session_cookie(&id, Html(page));
        }
    };

    let result = app.pipeline.run(&request, &mut tokens).await;
    // A logout during the run removed the session; it stays removed
    app.sessions.update(&id, |s| s.tokens = Some(tokens)).await;

    let page = match result {
        Ok(outcome) => pages::outcome(&outcome),
        Err(e) => pages::message(NoticeKind::Error, &e.to_string()),
    };
    with_session_cookie(&id, Html(page))
}

/// Builds a validated request from the submitted form fields.
///
/// `genre` may appear several times; `extra_genres` holds comma separated
/// free-form genres.
pub fn request_from_form(fields: &[(String, String)]) -> Res<PlaylistRequest> {
    let value = |key: &str| {
        fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let mood: Mood = value("mood")
        .ok_or_else(|| Error::InvalidInput("Pick a mood.".to_string()))?
        .parse()?;

    let genres = fields
        .iter()
        .filter(|(k, _)| k == "genre" || k == "extra_genres")
        .map(|(_, v)| v.clone())
        .collect::<Vec<_>>();

    let count = match value("count") {
        Some(count) => count.parse::<u32>().map_err(|_| {
            Error::InvalidInput(format!("Invalid number of songs: {}", count))
        })?,
        None => DEFAULT_SONG_COUNT,
    };

    let mut request = PlaylistRequest::new(mood, genres);
    request.count = count;
    request.user_id = value("user_id");
    request.name = value("name");
    request.description = value("description");
    request.public = value("public").is_some();
    request.songs = value("songs").map(|s| parse::parse_song_lines(&s));
    request.validate()
}
