#![allow(dead_code)]

use std::collections::HashMap;

use chrono::Utc;
use moodlist::{config::Settings, types::Token};

// Settings pointing every endpoint at `base` (usually a wiremock server uri)
pub fn settings_for(base: &str, client_secret: Option<&str>) -> Settings {
    let mut vars: HashMap<&str, String> = HashMap::new();
    vars.insert("SPOTIFY_CLIENT_ID", "client-id".to_string());
    if let Some(secret) = client_secret {
        vars.insert("SPOTIFY_CLIENT_SECRET", secret.to_string());
    }
    vars.insert("SPOTIFY_REDIRECT_URI", "http://127.0.0.1:8501/callback".to_string());
    vars.insert("SPOTIFY_AUTH_URL", format!("{}/authorize", base));
    vars.insert("SPOTIFY_TOKEN_URL", format!("{}/api/token", base));
    vars.insert("SPOTIFY_API_URL", format!("{}/v1", base));
    vars.insert("OPENAI_API_KEY", "sk-test".to_string());
    vars.insert("OPENAI_API_URL", format!("{}/llm", base));
    vars.insert("OPENAI_MODEL", "test-model".to_string());

    Settings::from_lookup(|key| vars.get(key).cloned()).expect("valid test settings")
}

pub fn fresh_token(access_token: &str) -> Token {
    Token {
        access_token: access_token.to_string(),
        refresh_token: Some("refresh-1".to_string()),
        scope: "playlist-modify-private".to_string(),
        expires_in: 3600,
        obtained_at: Utc::now().timestamp() as u64,
    }
}

pub fn expired_token(access_token: &str) -> Token {
    Token {
        obtained_at: Utc::now().timestamp() as u64 - 7200,
        ..fresh_token(access_token)
    }
}

pub fn chat_reply(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content }, "finish_reason": "stop" }
        ]
    })
}

pub fn search_reply(tracks: &[(&str, &str, &str)]) -> serde_json::Value {
    let items: Vec<serde_json::Value> = tracks
        .iter()
        .map(|(id, name, artist)| {
            serde_json::json!({
                "id": id,
                "name": name,
                "uri": format!("spotify:track:{}", id),
                "artists": [{ "name": artist }]
            })
        })
        .collect();
    serde_json::json!({ "tracks": { "items": items } })
}
