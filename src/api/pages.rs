//! HTML of the web form. Every user provided value goes through
//! [`html_escape`] before it is rendered.

use crate::{
    mood::{DEFAULT_SONG_COUNT, GENRES, MAX_SONG_COUNT, MIN_SONG_COUNT, Mood},
    types::PlaylistOutcome,
    utils::html_escape,
};

const STYLE: &str = r#"
body { background-color: #121212; color: white; font-family: sans-serif; max-width: 720px; margin: 0 auto; padding: 24px; }
h1, h2, h3 { color: #1DB954; text-align: center; }
a { color: #1DB954; font-weight: bold; }
label { display: block; margin-top: 12px; }
input, select, textarea { width: 100%; background-color: #2C2C2C; color: white; border: 1px solid #1DB954; border-radius: 10px; padding: 8px; box-sizing: border-box; }
input[type=checkbox] { width: auto; }
button { background-color: #1DB954; color: white; font-size: 16px; border: none; border-radius: 25px; padding: 10px 20px; margin-top: 16px; }
button:hover { background-color: #1ED760; }
.notice { padding: 12px; border-radius: 10px; margin: 12px 0; }
.success { background-color: #1b3d26; }
.error { background-color: #4a1c1c; }
.warning { background-color: #4a431c; }
"#;

/// Kind of a message box shown above the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

impl NoticeKind {
    fn class(&self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Warning => "warning",
            NoticeKind::Error => "error",
        }
    }
}

pub fn layout(body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>moodlist</title><style>{}</style></head>\
         <body><h1>moodlist</h1><h3>Playlists for your mood and favourite genres</h3>{}</body></html>",
        STYLE, body
    )
}

pub fn notice(kind: NoticeKind, message: &str) -> String {
    format!(
        "<div class=\"notice {}\">{}</div>",
        kind.class(),
        html_escape(message)
    )
}

/// Login link for anonymous sessions, the playlist form otherwise.
pub fn index(authenticated: bool, notices: &[(NoticeKind, String)]) -> String {
    let mut body: String = notices
        .iter()
        .map(|(kind, message)| notice(*kind, message))
        .collect();

    if !authenticated {
        body.push_str(
            "<h2>Authentication</h2><p style=\"text-align:center\"><a href=\"/login\">Log in with Spotify</a></p>",
        );
        return layout(&body);
    }

    body.push_str(&notice(NoticeKind::Success, "You are logged in."));
    body.push_str(&form());
    body.push_str("<p style=\"text-align:center\"><a href=\"/logout\">Log out</a></p>");
    layout(&body)
}

fn form() -> String {
    let moods: String = Mood::ALL
        .iter()
        .map(|m| format!("<option value=\"{0}\">{0}</option>", m.label()))
        .collect();
    let genres: String = GENRES
        .iter()
        .map(|g| format!("<option value=\"{0}\">{0}</option>", html_escape(g)))
        .collect();

    format!(
        r#"<h2>Generate a playlist</h2>
<form method="post" action="/generate">
<label>Mood <select name="mood">{moods}</select></label>
<label>Genres <select name="genre" multiple size="6">{genres}</select></label>
<label>Other genres (comma separated) <input name="extra_genres" placeholder="shoegaze, city pop"></label>
<label>Number of songs <input type="number" name="count" min="{min}" max="{max}" value="{default}"></label>
<label>Spotify user id (empty for the logged in user) <input name="user_id" placeholder="Spotify user"></label>
<label>Playlist name (empty to let the model pick one) <input name="name" placeholder="My new playlist"></label>
<label>Description <textarea name="description" rows="2" placeholder="Describe your playlist"></textarea></label>
<label>Own song list, one per line (skips the model) <textarea name="songs" rows="4" placeholder="Song 1 - Artist&#10;Song 2 - Artist"></textarea></label>
<label><input type="checkbox" name="public"> Public playlist</label>
<button type="submit">Create playlist</button>
</form>"#,
        moods = moods,
        genres = genres,
        min = MIN_SONG_COUNT,
        max = MAX_SONG_COUNT,
        default = DEFAULT_SONG_COUNT,
    )
}

/// Result page after a successful run.
pub fn outcome(outcome: &PlaylistOutcome) -> String {
    let name = html_escape(&outcome.playlist.name);
    let title = match &outcome.playlist.external_urls.spotify {
        Some(url) => format!("<a href=\"{}\">{}</a>", html_escape(url), name),
        None => name,
    };

    let mut body = notice(
        NoticeKind::Success,
        &format!("Playlist created: {}", outcome.playlist.name),
    );
    body.push_str(&format!(
        "<h2>{}</h2><p>{}</p>",
        title,
        html_escape(&outcome.description)
    ));

    if outcome.added > 0 {
        body.push_str(&format!("<h3>Added songs ({})</h3><ul>", outcome.added));
        for m in &outcome.matched {
            body.push_str(&format!(
                "<li>{} - {}</li>",
                html_escape(&m.track.name),
                html_escape(&m.track.artist_names())
            ));
        }
        body.push_str("</ul>");
    } else {
        body.push_str(&notice(NoticeKind::Warning, empty_playlist_message(outcome)));
    }

    let failed = outcome.failed_searches();
    if failed > 0 {
        body.push_str(&notice(
            NoticeKind::Error,
            &format!("The search failed for {} songs.", failed),
        ));
    }

    if !outcome.unmatched.is_empty() {
        body.push_str("<h3>Not added</h3><ul>");
        for unmatched in &outcome.unmatched {
            body.push_str(&format!("<li>{}</li>", html_escape(&unmatched.to_string())));
        }
        body.push_str("</ul>");
    }

    body.push_str("<p style=\"text-align:center\"><a href=\"/\">Create another playlist</a></p>");
    layout(&body)
}

/// Warning shown when no track could be added.
pub fn empty_playlist_message(outcome: &PlaylistOutcome) -> &'static str {
    if outcome.failed_searches() > 0 {
        "No song could be added, the playlist is empty."
    } else {
        "None of the generated songs was found on Spotify, the playlist is empty."
    }
}

/// Page showing a single message and a way back to the form.
pub fn message(kind: NoticeKind, text: &str) -> String {
    let mut body = notice(kind, text);
    body.push_str("<p style=\"text-align:center\"><a href=\"/\">Back</a></p>");
    layout(&body)
}
