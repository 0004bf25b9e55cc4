use moodlist::{
    Error,
    llm::{parse::*, prompt},
    mood::{Mood, PlaylistRequest},
    types::Song,
};

#[test]
fn test_clean_strips_code_fences() {
    let text = "```json\n{\"songs\": []}\n```";
    assert_eq!(clean(text), "{\"songs\": []}");
}

#[test]
fn test_clean_strips_surrounding_prose() {
    let text = "Sure! Here is your playlist:\n[{\"title\": \"Creep\"}]\nEnjoy the music!";
    assert_eq!(clean(text), "[{\"title\": \"Creep\"}]");
}

#[test]
fn test_clean_keeps_json_on_fence_line() {
    let text = "```json {\"songs\": [{\"title\": \"Creep\", \"artist\": \"Radiohead\"}]} ```";
    assert_eq!(
        clean(text),
        "{\"songs\": [{\"title\": \"Creep\", \"artist\": \"Radiohead\"}]}"
    );

    let generated = parse_generated(text).unwrap();
    assert_eq!(generated.songs, vec![Song::new("Creep", "Radiohead")]);
}

#[test]
fn test_clean_skips_brackets_in_leading_prose() {
    let text = "Here is your playlist [JSON]:\n{\"songs\": [{\"title\": \"Hurt\", \"artist\": \"Johnny Cash\"}]}";
    assert_eq!(
        clean(text),
        "{\"songs\": [{\"title\": \"Hurt\", \"artist\": \"Johnny Cash\"}]}"
    );

    let generated = parse_generated(text).unwrap();
    assert_eq!(generated.songs, vec![Song::new("Hurt", "Johnny Cash")]);
}

#[test]
fn test_clean_skips_number_lists_in_prose() {
    let text = "I picked [3] songs: [\"Creep - Radiohead\", \"Hurt - Johnny Cash\"] (2 of them older).";
    assert_eq!(
        clean(text),
        "[\"Creep - Radiohead\", \"Hurt - Johnny Cash\"]"
    );
}

#[test]
fn test_clean_without_json() {
    assert_eq!(clean("  I cannot help with that.  "), "I cannot help with that.");
}

#[test]
fn test_parse_object_with_name_and_description() {
    let text = r#"```json
{
  "name": "Sunny Side",
  "description": "Bright pop for good days.",
  "songs": [
    {"title": "Walking on Sunshine", "artist": "Katrina and the Waves"},
    {"title": "Happy", "artist": "Pharrell Williams"}
  ]
}
```"#;

    let generated = parse_generated(text).unwrap();
    assert_eq!(generated.name.as_deref(), Some("Sunny Side"));
    assert_eq!(
        generated.description.as_deref(),
        Some("Bright pop for good days.")
    );
    assert_eq!(
        generated.songs,
        vec![
            Song::new("Walking on Sunshine", "Katrina and the Waves"),
            Song::new("Happy", "Pharrell Williams"),
        ]
    );
}

#[test]
fn test_parse_bare_array_with_alternative_keys() {
    let text = r#"[
        {"song": "Creep", "artists": ["Radiohead"]},
        {"name": "Under Pressure", "artists": ["Queen", "David Bowie"]},
        {"track": "Intro"}
    ]"#;

    let generated = parse_generated(text).unwrap();
    assert_eq!(generated.name, None);
    assert_eq!(
        generated.songs,
        vec![
            Song::new("Creep", "Radiohead"),
            Song::new("Under Pressure", "Queen, David Bowie"),
            Song::new("Intro", ""),
        ]
    );
}

#[test]
fn test_parse_string_entries() {
    let text = r#"{"tracks": ["Creep - Radiohead", "1. Hurt - Johnny Cash"]}"#;
    let generated = parse_generated(text).unwrap();
    assert_eq!(
        generated.songs,
        vec![Song::new("Creep", "Radiohead"), Song::new("Hurt", "Johnny Cash")]
    );
}

#[test]
fn test_parse_drops_duplicates_and_titleless_entries() {
    let text = r#"{"songs": [
        {"title": "Creep", "artist": "Radiohead"},
        {"title": "creep", "artist": "RADIOHEAD"},
        {"artist": "Nobody"},
        {"title": "  ", "artist": "Blank"},
        42
    ]}"#;

    let generated = parse_generated(text).unwrap();
    assert_eq!(generated.songs, vec![Song::new("Creep", "Radiohead")]);
}

#[test]
fn test_parse_rejects_invalid_json() {
    let result = parse_generated("Here you go: {\"songs\": [{\"title\": \"Creep\",}");
    assert!(matches!(result, Err(Error::ModelOutput(_))));
}

#[test]
fn test_parse_rejects_prose_only() {
    let result = parse_generated("I'm sorry, I can't do that.");
    assert!(matches!(result, Err(Error::ModelOutput(_))));
}

#[test]
fn test_parse_rejects_missing_song_list() {
    let result = parse_generated(r#"{"name": "Empty"}"#);
    assert!(matches!(result, Err(Error::ModelOutput(_))));

    let result = parse_generated(r#"{"songs": []}"#);
    assert!(matches!(result, Err(Error::ModelOutput(_))));
}

#[test]
fn test_parse_model_output_error_message() {
    let err = parse_generated("").unwrap_err();
    assert!(err.to_string().starts_with("Could not read the generated song list"));
}

#[test]
fn test_parse_song_lines() {
    let text = "Creep - Radiohead\n\n  - Hurt – Johnny Cash\n* \"Yesterday\"\n3) Song 2 - Blur";
    assert_eq!(
        parse_song_lines(text),
        vec![
            Song::new("Creep", "Radiohead"),
            Song::new("Hurt", "Johnny Cash"),
            Song::new("Yesterday", ""),
            Song::new("Song 2", "Blur"),
        ]
    );
}

#[test]
fn test_parse_song_line_keeps_hyphenated_titles() {
    assert_eq!(
        parse_song_line("Anti-Hero - Taylor Swift"),
        Some(Song::new("Anti-Hero", "Taylor Swift"))
    );
    assert_eq!(parse_song_line("   "), None);
}

#[test]
fn test_prompt_asks_for_name_only_when_missing() {
    let mut request = PlaylistRequest::new(Mood::Party, vec!["house".to_string()]);
    request.count = 15;

    let messages = prompt::build(&request);
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, "system");
    let user = &messages[1].content;
    assert!(user.contains("exactly 15 existing songs"));
    assert!(user.contains("party"));
    assert!(user.contains("house"));
    assert!(user.contains("\"name\""));
    assert!(user.contains("\"description\""));

    request.name = Some("Friday".to_string());
    request.description = Some("Warm up".to_string());
    let user = prompt::build(&request)[1].content.clone();
    assert!(!user.contains("\"name\""));
    assert!(!user.contains("\"description\""));
    assert!(user.contains("\"Friday\""));
}
