//! Error types shared by the Spotify client, the credential store and the
//! HTTP surface.

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A required configuration value is absent. Fatal at startup.
    #[error("missing required environment variable: {0}")]
    MissingConfig(&'static str),

    #[error("request to Spotify failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response whose body carried Spotify's `{error: {status, message}}` shape.
    #[error("Spotify API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Non-2xx response with a body we could not interpret.
    #[error("unexpected Spotify API response ({status} {reason})")]
    UnexpectedResponse { status: u16, reason: String },

    /// Success status, but the body did not decode.
    #[error("malformed Spotify response: {0}")]
    MalformedResponse(String),

    #[error("no credential stored, run `moodwave auth` first")]
    NoCredential,

    /// The stored credential failed to refresh; the user has to sign in again.
    #[error("credential refresh failed, sign in again with `moodwave auth`")]
    ReauthRequired,

    #[error("credential store: {0}")]
    Store(String),
}

impl Error {
    /// Upstream HTTP status, when the error came from a Spotify response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } | Error::UnexpectedResponse { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// True when the hosting layer should send the user back to sign-in.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::NoCredential | Error::ReauthRequired) || self.status() == Some(401)
    }
}
