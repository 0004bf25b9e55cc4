//! Mood based Spotify playlist generator.
//!
//! This library turns a mood and a handful of genres into a Spotify playlist.
//! A language model suggests the songs, the Spotify Web API finds them in the
//! catalog and a freshly created playlist receives every song that matched.
//!
//! # Modules
//!
//! - `api` - HTTP handlers of the web form and the OAuth callback
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration loading from environment variables and `.env` files
//! - `error` - The error type shared by all operations
//! - `llm` - Chat completion client, prompt building and answer parsing
//! - `management` - Session scoped token and session handling
//! - `mood` - Moods, genres and the validated user request
//! - `pipeline` - The generate, create, search and add sequence
//! - `server` - Local HTTP servers (web form and one-shot login callback)
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod management;
pub mod mood;
pub mod pipeline;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::Error;

/// A convenient Result type alias for operations that may fail.
///
/// Every error is an [`Error`] whose message can be shown to the user.
pub type Res<T> = std::result::Result<T, Error>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Asking the model for {} songs...", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Playlist {} created", name);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for failures that leave nothing to do, such as a missing
/// configuration at startup. Pipeline failures are reported with
/// [`warning!`] instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("No match for {} by {}", song.title, song.artist);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
