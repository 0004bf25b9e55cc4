use std::{collections::HashMap, io::Write};

use moodlist::{Error, config::Settings, types::Song, utils::*};

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should be deterministic - same input produces same output
    assert_eq!(challenge, generate_code_challenge(verifier));

    // Different input should produce different output
    assert_ne!(challenge, generate_code_challenge("different_verifier"));

    // SHA256 is 32 bytes, 43 characters in unpadded base64
    assert_eq!(challenge.len(), 43);
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_generate_code_challenge_rfc7636_vector() {
    let verifier = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
    assert_eq!(
        generate_code_challenge(verifier),
        "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
    );
}

#[test]
fn test_generate_state() {
    let state = generate_state();
    assert_eq!(state.len(), 32);
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(state, generate_state());
}

#[test]
fn test_html_escape() {
    assert_eq!(
        html_escape(r#"<script>alert("x & 'y'")</script>"#),
        "&lt;script&gt;alert(&quot;x &amp; &#39;y&#39;&quot;)&lt;/script&gt;"
    );
    assert_eq!(html_escape("Beyoncé"), "Beyoncé");
}

#[test]
fn test_cookie_value() {
    let header = "theme=dark; moodlist_session=abc123; other=1";
    assert_eq!(cookie_value(header, "moodlist_session"), Some("abc123"));
    assert_eq!(cookie_value(header, "theme"), Some("dark"));
    assert_eq!(cookie_value(header, "missing"), None);
    assert_eq!(cookie_value("moodlist_session=", "moodlist_session"), None);
}

#[tokio::test]
async fn test_read_song_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "1. Creep - Radiohead").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "Hallelujah").unwrap();

    let songs = read_song_file(file.path()).await.unwrap();
    assert_eq!(
        songs,
        vec![Song::new("Creep", "Radiohead"), Song::new("Hallelujah", "")]
    );
}

#[tokio::test]
async fn test_read_song_file_missing() {
    let result = read_song_file(std::path::Path::new("/definitely/not/here.txt")).await;
    assert!(matches!(result, Err(Error::Io(_))));
}

fn lookup(vars: &[(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<&str, &str> = vars.iter().copied().collect();
    move |key: &str| vars.get(key).map(|v| v.to_string())
}

#[test]
fn test_settings_defaults() {
    let settings = Settings::from_lookup(lookup(&[
        ("SPOTIFY_CLIENT_ID", "id"),
        ("OPENAI_API_KEY", "key"),
        ("SPOTIFY_CLIENT_SECRET", "   "),
    ]))
    .unwrap();

    assert_eq!(settings.spotify.client_id, "id");
    assert_eq!(settings.spotify.client_secret, None);
    assert_eq!(settings.spotify.redirect_uri, "http://127.0.0.1:8501/callback");
    assert_eq!(
        settings.spotify.scope,
        "playlist-modify-private playlist-modify-public"
    );
    assert_eq!(settings.spotify.api_url, "https://api.spotify.com/v1");
    assert_eq!(settings.llm.api_url, "https://api.openai.com/v1");
    assert_eq!(settings.server_address, "127.0.0.1:8501");
}

#[test]
fn test_settings_trim_trailing_slash() {
    let settings = Settings::from_lookup(lookup(&[
        ("SPOTIFY_CLIENT_ID", "id"),
        ("OPENAI_API_KEY", "key"),
        ("SPOTIFY_API_URL", "http://localhost:9000/v1/"),
        ("OPENAI_API_URL", "http://localhost:9001/"),
    ]))
    .unwrap();

    assert_eq!(settings.spotify.api_url, "http://localhost:9000/v1");
    assert_eq!(settings.llm.api_url, "http://localhost:9001");
}

#[test]
fn test_settings_missing_required() {
    let err = Settings::from_lookup(lookup(&[("SPOTIFY_CLIENT_ID", "id")])).unwrap_err();
    match err {
        Error::Config(msg) => assert!(msg.contains("OPENAI_API_KEY")),
        other => panic!("Expected Config error, got {:?}", other),
    }

    let err = Settings::from_lookup(lookup(&[("OPENAI_API_KEY", "key")])).unwrap_err();
    assert!(err.to_string().contains("SPOTIFY_CLIENT_ID"));
}
