use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use moodlist::{
    cli,
    config::{self, Settings},
    error,
    mood::{DEFAULT_SONG_COUNT, Mood},
    warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightGreen.on_default())
        .placeholder(AnsiColor::BrightBlue.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve the playlist web form
    Serve(ServeOptions),

    /// Log in through the browser and create one playlist
    Generate(GenerateOptions),

    /// List supported moods and suggested genres
    Info(InfoOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to listen on (defaults to SERVER_ADDRESS)
    #[clap(long)]
    addr: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateOptions {
    /// Mood of the playlist
    #[clap(long, value_enum)]
    mood: Mood,

    /// Genre to include; can be repeated or comma separated
    #[clap(long = "genre", num_args = 1)]
    genres: Vec<String>,

    /// Number of songs to ask for
    #[clap(long, default_value_t = DEFAULT_SONG_COUNT)]
    count: u32,

    /// Owner of the playlist (defaults to SPOTIFY_USER_ID, then the logged in user)
    #[clap(long)]
    user_id: Option<String>,

    /// Playlist name (generated when omitted)
    #[clap(long)]
    name: Option<String>,

    /// Playlist description (generated when omitted)
    #[clap(long)]
    description: Option<String>,

    /// Make the playlist public
    #[clap(long)]
    public: bool,

    /// Use the songs of this file (one "Title - Artist" per line) instead of the model
    #[clap(long)]
    songs_file: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct InfoOptions {
    #[clap(long)]
    moods: bool,
    #[clap(long)]
    genres: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn load_settings() -> Settings {
    match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!(
            "{}\nAdd it to {} or the environment.",
            e,
            config::env_path().display()
        ),
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(opt) => cli::serve(load_settings(), opt.addr).await,
        Command::Generate(opt) => {
            let args = cli::GenerateArgs {
                mood: opt.mood,
                genres: opt.genres,
                count: opt.count,
                user_id: opt.user_id,
                name: opt.name,
                description: opt.description,
                public: opt.public,
                songs_file: opt.songs_file,
            };
            cli::generate(load_settings(), args).await
        }
        Command::Info(opt) => cli::info(opt.moods, opt.genres).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
