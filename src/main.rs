use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use moodwave::{cli, config, error};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Store a Spotify refresh token and validate it
    Auth(AuthOptions),

    /// List the mood presets
    Moods,

    /// List valid genre seeds
    Genres,

    /// Get recommendations for a mood
    Recommend(RecommendOptions),

    /// Serve the HTTP API
    Serve,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthOptions {
    /// Refresh token from a completed Spotify sign-in
    #[clap(long)]
    pub refresh_token: String,
}

#[derive(Parser, Debug, Clone)]
pub struct RecommendOptions {
    /// Mood key (happy, sad, energetic, chill, focus, romantic)
    #[clap(long)]
    pub mood: Option<String>,

    /// Comma separated genres used instead of the mood's defaults
    #[clap(long)]
    pub genres: Option<String>,

    /// Save the tracks as a new private playlist
    #[clap(long)]
    pub save: bool,

    /// Playlist name, defaults to "Moodwave • <date>"
    #[clap(long, requires = "save")]
    pub name: Option<String>,

    /// Open the saved playlist in the browser
    #[clap(long, requires = "save")]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

/// Installs the global subscriber. Logs go to stderr so they never mix with
/// tables printed on stdout.
fn init_tracing(default_level: LevelFilter) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .init();
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();
    init_tracing(match cli.command {
        Command::Serve => LevelFilter::INFO,
        _ => LevelFilter::WARN,
    });

    match cli.command {
        Command::Auth(opt) => cli::auth(opt.refresh_token).await,
        Command::Moods => cli::list_moods(),
        Command::Genres => cli::list_genres(),
        Command::Recommend(opt) => {
            cli::recommend(cli::RecommendOptions {
                mood: opt.mood,
                genres: opt.genres,
                save: opt.save,
                name: opt.name,
                open: opt.open,
            })
            .await
        }
        Command::Serve => cli::serve().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
