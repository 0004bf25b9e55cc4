use crate::{mood::PlaylistRequest, types::ChatMessage};

const SYSTEM_PROMPT: &str = "You are a music curator. You only answer with a single JSON object, \
without code fences, comments or any text before or after it.";

/// Builds the chat messages asking for the songs of `request`.
///
/// The playlist name and description are only asked for when the user left
/// them empty.
pub fn build(request: &PlaylistRequest) -> Vec<ChatMessage> {
    let ask_name = request.name.is_none();
    let ask_description = request.description.is_none();

    let mut fields = Vec::new();
    if ask_name {
        fields.push(r#""name": a short, catchy playlist name"#);
    }
    if ask_description {
        fields.push(r#""description": one sentence describing the playlist"#);
    }
    fields.push(r#""songs": an array of objects with the keys "title" and "artist""#);

    let mut prompt = format!(
        "Suggest exactly {count} existing songs for a {mood} mood ({hint}) in the genre(s): {genres}.\n\
         Only include songs that are available on Spotify and do not repeat songs.\n\
         Answer with a JSON object with these keys:\n",
        count = request.count,
        mood = request.mood,
        hint = request.mood.hint(),
        genres = request.genres.join(", "),
    );
    for field in fields {
        prompt.push_str("- ");
        prompt.push_str(field);
        prompt.push('\n');
    }
    if let Some(name) = &request.name {
        prompt.push_str(&format!("The playlist is called \"{}\".\n", name));
    }

    vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)]
}
