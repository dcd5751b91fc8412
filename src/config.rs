//! Configuration management for Moodwave.
//!
//! Values come from environment variables, optionally seeded from a `.env` file
//! in the local data directory:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults for the Spotify hosts and the server address

use std::{env, path::PathBuf};

use crate::error::{Error, Result};

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_ACCOUNTS_URL: &str = "https://accounts.spotify.com";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3000";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The file lives under `moodwave/.env`:
/// - Linux: `~/.local/share/moodwave/.env`
/// - macOS: `~/Library/Application Support/moodwave/.env`
/// - Windows: `%LOCALAPPDATA%/moodwave/.env`
///
/// A missing file is fine, plain environment variables are enough. Variables
/// already present in the process environment are never overridden.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or the file
/// exists but cannot be parsed.
pub async fn load_env() -> std::result::Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("moodwave/.env");
    path
}

/// Client credentials and hosts used to talk to Spotify.
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Web API base, e.g. `https://api.spotify.com/v1`.
    pub api_url: String,
    /// Accounts host serving `/api/token`.
    pub accounts_url: String,
}

impl SpotifyConfig {
    /// Configuration for the public Spotify hosts.
    ///
    /// # Arguments
    ///
    /// * `client_id` - Application client id from the Spotify dashboard
    /// * `client_secret` - Matching client secret, only sent to the token endpoint
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            api_url: DEFAULT_API_URL.to_string(),
            accounts_url: DEFAULT_ACCOUNTS_URL.to_string(),
        }
    }

    /// Points the client at different hosts (used by tests and proxies).
    ///
    /// # Arguments
    ///
    /// * `api_url` - Web API base including the version, e.g. `http://127.0.0.1:9000/v1`
    /// * `accounts_url` - Host serving `/api/token`
    ///
    /// A trailing `/` is removed from both.
    pub fn with_hosts(mut self, api_url: impl Into<String>, accounts_url: impl Into<String>) -> Self {
        self.api_url = trim_slash(api_url.into());
        self.accounts_url = trim_slash(accounts_url.into());
        self
    }

    /// Reads `SPOTIFY_CLIENT_ID` and `SPOTIFY_CLIENT_SECRET` (required) plus the
    /// optional `SPOTIFY_API_URL` and `SPOTIFY_ACCOUNTS_URL` overrides.
    ///
    /// Blank values count as unset. Call [`load_env`] first to pick up the
    /// `.env` file.
    ///
    /// # Errors
    ///
    /// [`Error::MissingConfig`] naming the first required variable that is unset
    /// or empty.
    pub fn from_env() -> Result<Self> {
        let client_id = required("SPOTIFY_CLIENT_ID")?;
        let client_secret = required("SPOTIFY_CLIENT_SECRET")?;
        let api_url = optional("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let accounts_url =
            optional("SPOTIFY_ACCOUNTS_URL").unwrap_or_else(|| DEFAULT_ACCOUNTS_URL.to_string());

        Ok(Self::new(client_id, client_secret).with_hosts(api_url, accounts_url))
    }
}

/// Settings for `moodwave serve`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub address: String,
}

impl ServerConfig {
    /// Reads `SERVER_ADDRESS`, defaulting to `127.0.0.1:3000`.
    ///
    /// The value is not validated here; [`start_api_server`] rejects an
    /// address it cannot parse.
    ///
    /// [`start_api_server`]: crate::server::start_api_server
    pub fn from_env() -> Self {
        Self {
            address: optional("SERVER_ADDRESS")
                .unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string()),
        }
    }
}

fn required(key: &'static str) -> Result<String> {
    optional(key).ok_or(Error::MissingConfig(key))
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn trim_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
