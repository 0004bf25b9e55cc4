use std::{collections::HashSet, fmt, str::FromStr};

use clap::ValueEnum;

use crate::{Error, Res, types::Song};

pub const MIN_SONG_COUNT: u32 = 1;
pub const MAX_SONG_COUNT: u32 = 50;
pub const DEFAULT_SONG_COUNT: u32 = 10;

/// Genres offered by the form and listed by `moodlist info`. Any other genre
/// typed by the user is accepted as well.
pub const GENRES: &[&str] = &[
    "pop",
    "rock",
    "indie",
    "hip hop",
    "r&b",
    "jazz",
    "blues",
    "soul",
    "funk",
    "electronic",
    "house",
    "techno",
    "ambient",
    "classical",
    "country",
    "folk",
    "reggae",
    "latin",
    "reggaeton",
    "metal",
    "punk",
    "k-pop",
    "lo-fi",
    "soundtrack",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Mood {
    Happy,
    Sad,
    Energetic,
    Relaxed,
    Romantic,
    Melancholic,
    Focused,
    Party,
    Nostalgic,
    Angry,
}

impl Mood {
    pub const ALL: [Mood; 10] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Energetic,
        Mood::Relaxed,
        Mood::Romantic,
        Mood::Melancholic,
        Mood::Focused,
        Mood::Party,
        Mood::Nostalgic,
        Mood::Angry,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Energetic => "energetic",
            Mood::Relaxed => "relaxed",
            Mood::Romantic => "romantic",
            Mood::Melancholic => "melancholic",
            Mood::Focused => "focused",
            Mood::Party => "party",
            Mood::Nostalgic => "nostalgic",
            Mood::Angry => "angry",
        }
    }

    /// Short description fed into the prompt.
    pub fn hint(&self) -> &'static str {
        match self {
            Mood::Happy => "upbeat, bright and feel-good songs",
            Mood::Sad => "slow, heartfelt songs about loss and longing",
            Mood::Energetic => "high tempo songs that push you forward",
            Mood::Relaxed => "calm, laid-back songs to unwind",
            Mood::Romantic => "warm love songs",
            Mood::Melancholic => "bittersweet, reflective songs",
            Mood::Focused => "steady songs that help concentration, few distracting lyrics",
            Mood::Party => "danceable crowd pleasers",
            Mood::Nostalgic => "songs that bring back memories of past decades",
            Mood::Angry => "loud, intense songs to let off steam",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mood {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Mood::ALL
            .into_iter()
            .find(|m| m.label() == wanted)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown mood: {}", s.trim())))
    }
}

/// Trims genres, drops empty ones and removes case-insensitive duplicates while
/// keeping the first spelling.
pub fn normalize_genres<I, S>(genres: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    genres
        .into_iter()
        .flat_map(|g| {
            g.as_ref()
                .split(',')
                .map(|s| s.trim().to_string())
                .collect::<Vec<_>>()
        })
        .filter(|g| !g.is_empty())
        .filter(|g| seen.insert(g.to_lowercase()))
        .collect()
}

/// Everything the user asked for in one generate action.
#[derive(Debug, Clone)]
pub struct PlaylistRequest {
    pub mood: Mood,
    pub genres: Vec<String>,
    pub count: u32,
    /// Owner of the playlist; the logged in user when absent.
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub public: bool,
    /// Songs typed by the user; skips the language model when present.
    pub songs: Option<Vec<Song>>,
}

impl PlaylistRequest {
    pub fn new(mood: Mood, genres: Vec<String>) -> Self {
        Self {
            mood,
            genres: normalize_genres(genres),
            count: DEFAULT_SONG_COUNT,
            user_id: None,
            name: None,
            description: None,
            public: false,
            songs: None,
        }
    }

    /// Rejects requests that cannot produce a playlist.
    ///
    /// Blank optional fields are turned into `None` on the way.
    pub fn validate(mut self) -> Res<Self> {
        self.user_id = non_blank(self.user_id);
        self.name = non_blank(self.name);
        self.description = non_blank(self.description);
        self.genres = normalize_genres(&self.genres);
        if self.songs.as_ref().is_some_and(|s| s.is_empty()) {
            self.songs = None;
        }

        if self.songs.is_none() && self.genres.is_empty() {
            return Err(Error::InvalidInput(
                "Pick at least one genre or provide a song list.".to_string(),
            ));
        }

        if !(MIN_SONG_COUNT..=MAX_SONG_COUNT).contains(&self.count) {
            return Err(Error::InvalidInput(format!(
                "The number of songs must be between {} and {}.",
                MIN_SONG_COUNT, MAX_SONG_COUNT
            )));
        }

        Ok(self)
    }

    /// Name used when neither the user nor the model provided one.
    pub fn fallback_name(&self) -> String {
        if self.genres.is_empty() {
            return format!("{} mix", capitalize(self.mood.label()));
        }
        format!(
            "{} {} mix",
            capitalize(self.mood.label()),
            self.genres.join(" & ")
        )
    }

    pub fn fallback_description(&self) -> String {
        if self.genres.is_empty() {
            return format!("Songs for a {} mood.", self.mood);
        }
        format!(
            "Songs for a {} mood in {}.",
            self.mood,
            self.genres.join(", ")
        )
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
