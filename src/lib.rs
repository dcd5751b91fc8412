//! Moodwave: mood-based playlists on top of the Spotify Web API.
//!
//! A user picks a mood; Moodwave asks Spotify for recommendations filtered by
//! the audio-feature ranges of that mood, seeded by the user's own listening
//! history when available, and can save the result as a playlist.
//!
//! # Modules
//!
//! - `api` - HTTP route handlers for the local server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Typed errors of the Spotify client and credential store
//! - `management` - Credential persistence for the hosting layer
//! - `moods` - The mood catalog
//! - `server` - Router and listener for `moodwave serve`
//! - `spotify` - Spotify Web API client: refresh, recommendations, playlists
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use moodwave::{config::SpotifyConfig, management::CredentialStore, spotify::SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> moodwave::Res<()> {
//!     let client = SpotifyClient::new(SpotifyConfig::from_env()?);
//!     let mut store = CredentialStore::new().load().await?;
//!     let credential = store.session(&client).await?;
//!     let result = client.recommendations_for_mood(&credential, Some("chill"), None).await?;
//!     println!("{} tracks", result.tracks.len());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod moods;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Boxed-error result used by the CLI and server glue, where failures from
/// several sources meet.
///
/// # Example
///
/// ```
/// use moodwave::{Res, config::ServerConfig};
///
/// fn listen_address() -> Res<std::net::SocketAddr> {
///     Ok(ServerConfig::from_env().address.parse()?)
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints a status line prefixed with a blue `o`.
///
/// ```
/// info!("Fetching {} recommendations...", mood);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a line prefixed with a green `✓`.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a line prefixed with a red `!` and exits with code 1.
///
/// Only for failures the command cannot continue from, such as missing
/// configuration or a credential that needs a new sign-in. Code after the
/// call does not run.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a line prefixed with a yellow `!` for recoverable problems.
///
/// ```
/// warning!("Unknown mood '{}', using '{}'", raw, mood);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
