//! Turns free-form language model answers into a song list.
//!
//! Models are asked for plain JSON but regularly wrap it in code fences or
//! surround it with a sentence or two. [`clean`] strips those artifacts and
//! [`parse_generated`] reads whatever JSON shape is left.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::{
    Error, Res,
    types::{GeneratedPlaylist, Song},
};

const SONG_LIST_KEYS: &[&str] = &["songs", "tracks", "playlist", "songList"];
const TITLE_KEYS: &[&str] = &["title", "name", "song", "track"];
const ARTIST_KEYS: &[&str] = &["artist", "artists", "by", "performer"];
const NAME_KEYS: &[&str] = &["name", "playlist_name", "playlistName"];
const DESCRIPTION_KEYS: &[&str] = &["description", "playlist_description", "playlistDescription"];

/// Removes code fences and any prose around the JSON payload.
///
/// Fence markers and their language tag are dropped, the text between them
/// is kept. The payload is the first `{` or `[` from which a complete JSON
/// object or song array parses; brackets inside the prose are skipped.
/// Without such a start, everything from the first bracket on is returned so
/// the caller can report the syntax error. Text without any bracket is
/// returned trimmed.
pub fn clean(text: &str) -> String {
    let unfenced = strip_fences(text);

    let starts = unfenced
        .char_indices()
        .filter(|(_, c)| *c == '{' || *c == '[')
        .map(|(i, _)| i)
        .collect::<Vec<_>>();

    for &start in &starts {
        let mut stream =
            serde_json::Deserializer::from_str(&unfenced[start..]).into_iter::<Value>();
        if let Some(Ok(value)) = stream.next() {
            if is_payload(&value) {
                return unfenced[start..start + stream.byte_offset()].to_string();
            }
        }
    }

    match starts.first() {
        Some(&start) => unfenced[start..].trim().to_string(),
        None => unfenced.trim().to_string(),
    }
}

fn strip_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, piece) in text.split("```").enumerate() {
        // Odd pieces follow an opening fence and may start with a language tag
        let piece = if i % 2 == 1 {
            piece.trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        } else {
            piece
        };
        out.push_str(piece);
    }
    out
}

fn is_payload(value: &Value) -> bool {
    match value {
        Value::Object(_) => true,
        Value::Array(entries) => entries
            .iter()
            .all(|e| matches!(e, Value::String(_) | Value::Object(_))),
        _ => false,
    }
}

/// Parses a model answer into songs and the optional playlist name and
/// description.
///
/// Accepted shapes are an object holding a song array (under `songs`,
/// `tracks`, `playlist` or `songList`) or a bare array. Each entry is either
/// an object or a `"Title - Artist"` string.
///
/// # Errors
///
/// [`Error::ModelOutput`] when the cleaned text is not JSON, has no song array
/// or yields no usable song.
pub fn parse_generated(text: &str) -> Res<GeneratedPlaylist> {
    let cleaned = clean(text);
    if cleaned.is_empty() {
        return Err(Error::ModelOutput("the answer was empty".to_string()));
    }

    let value: Value = serde_json::from_str(&cleaned)
        .map_err(|e| Error::ModelOutput(format!("the answer is not valid JSON ({})", e)))?;

    let (entries, object) = match &value {
        Value::Array(entries) => (entries, None),
        Value::Object(object) => {
            let entries = SONG_LIST_KEYS
                .iter()
                .find_map(|key| object.get(*key).and_then(Value::as_array))
                .ok_or_else(|| {
                    Error::ModelOutput("the answer does not contain a song list".to_string())
                })?;
            (entries, Some(object))
        }
        _ => {
            return Err(Error::ModelOutput(
                "the answer does not contain a song list".to_string(),
            ));
        }
    };

    let songs = dedup_songs(entries.iter().filter_map(song_from_value));
    if songs.is_empty() {
        return Err(Error::ModelOutput(
            "the answer does not contain any song".to_string(),
        ));
    }

    Ok(GeneratedPlaylist {
        name: object.and_then(|o| first_string(o, NAME_KEYS)),
        description: object.and_then(|o| first_string(o, DESCRIPTION_KEYS)),
        songs,
    })
}

/// Parses a song list typed by the user, one song per line.
///
/// Lines may carry list markers (`1.`, `-`, `*`) and an optional
/// `Title - Artist` split. Blank lines are skipped.
pub fn parse_song_lines(text: &str) -> Vec<Song> {
    dedup_songs(text.lines().filter_map(parse_song_line))
}

/// Parses a single `Title - Artist` line.
pub fn parse_song_line(line: &str) -> Option<Song> {
    let line = strip_list_marker(line.trim());
    if line.is_empty() {
        return None;
    }

    let split = [" - ", " – ", " — "]
        .iter()
        .find_map(|sep| line.split_once(sep));

    match split {
        Some((title, artist)) if !title.trim().is_empty() => {
            Some(Song::new(unquote(title), artist.trim()))
        }
        _ => Some(Song::new(unquote(line), "")),
    }
}

fn song_from_value(value: &Value) -> Option<Song> {
    match value {
        Value::String(s) => parse_song_line(s),
        Value::Object(object) => {
            let title = first_string(object, TITLE_KEYS)?;
            let artist = ARTIST_KEYS
                .iter()
                .find_map(|key| object.get(*key).and_then(artist_from_value))
                .unwrap_or_default();
            Some(Song::new(title, artist))
        }
        _ => None,
    }
}

fn artist_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Array(artists) => {
            let names = artists
                .iter()
                .filter_map(|a| match a {
                    Value::String(s) => Some(s.trim().to_string()),
                    Value::Object(o) => o.get("name").and_then(Value::as_str).map(str::to_string),
                    _ => None,
                })
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>();
            (!names.is_empty()).then(|| names.join(", "))
        }
        Value::Object(o) => o.get("name").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

fn first_string(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| object.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn dedup_songs(songs: impl Iterator<Item = Song>) -> Vec<Song> {
    let mut seen = HashSet::new();
    songs
        .filter(|s| !s.title.trim().is_empty())
        .filter(|s| seen.insert((s.title.to_lowercase(), s.artist.to_lowercase())))
        .collect()
}

fn strip_list_marker(line: &str) -> &str {
    let line = line.trim_start_matches(['-', '*', '•']).trim_start();
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return rest.trim_start();
        }
    }
    line
}

fn unquote(s: &str) -> String {
    s.trim().trim_matches(['"', '\'', '“', '”']).trim().to_string()
}
