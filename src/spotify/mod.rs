//! # Spotify Integration Module
//!
//! The layer between Moodwave and the Spotify Web API. Everything goes through
//! [`SpotifyClient`], which owns one pooled `reqwest::Client` and the configured
//! hosts, so tests can point it at a local server.
//!
//! ```text
//! Hosting layer (CLI, HTTP routes, CredentialStore)
//!          ↓
//! SpotifyClient
//!     ├── auth             Credential refresh and expiry checks
//!     ├── recommendations  Mood-filtered recommendations with seed resolution
//!     ├── playlist         Profile lookup, playlist creation, track insertion
//!     └── genres           Static list of valid genre seeds
//!          ↓
//! reqwest → Spotify Web API / Accounts service
//! ```
//!
//! ## Response handling
//!
//! Bodies are read as text first and parsed defensively:
//! - non-2xx with Spotify's `{error: {status, message}}` envelope → [`Error::Api`]
//! - non-2xx with anything else → [`Error::UnexpectedResponse`]
//! - 2xx whose body does not decode → [`Error::MalformedResponse`]
//!
//! The token endpoint has its own handling in [`auth`], where failures are
//! recorded on the credential instead of being returned as errors.

pub mod auth;
pub mod genres;
pub mod playlist;
pub mod recommendations;

use reqwest::{Client, RequestBuilder, header::CONTENT_TYPE};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    config::SpotifyConfig,
    error::{Error, Result},
    types::{ApiErrorBody, Credential},
};

/// Longest body excerpt kept in logs and error messages.
const BODY_EXCERPT: usize = 200;

/// Stateless Spotify Web API client.
///
/// Holds no credentials: every call takes the [`Credential`] to authorize
/// with, and [`refresh`](SpotifyClient::refresh) hands back a new value
/// instead of updating anything in place. Cloning is cheap, the underlying
/// connection pool is shared.
///
/// # Example
///
/// ```no_run
/// use moodwave::{config::SpotifyConfig, spotify::SpotifyClient};
///
/// let client = SpotifyClient::new(SpotifyConfig::new("client-id", "client-secret"));
/// assert_eq!(client.config().api_url, "https://api.spotify.com/v1");
/// ```
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    config: SpotifyConfig,
}

impl SpotifyClient {
    /// Creates a client for the hosts and client credentials in `config`.
    ///
    /// # Arguments
    ///
    /// * `config` - Client id and secret plus the Web API and Accounts hosts
    pub fn new(config: SpotifyConfig) -> Self {
        Self {
            http: Client::new(),
            config,
        }
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &SpotifyConfig {
        &self.config
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url, path)
    }

    /// Bearer-authorized GET against the Web API.
    ///
    /// # Arguments
    ///
    /// * `credential` - Credential whose access token authorizes the call
    /// * `path` - Path below the API base, starting with `/`
    /// * `query` - Query parameters, sent in the given order
    ///
    /// # Errors
    ///
    /// See [`execute`] for how responses map to [`Error`] variants. Transport
    /// failures come back as [`Error::Transport`].
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        credential: &Credential,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let request = self
            .http
            .get(self.api_url(path))
            .bearer_auth(&credential.access_token)
            .query(query);
        execute(request).await
    }

    /// Bearer-authorized POST with a JSON body against the Web API.
    ///
    /// # Arguments
    ///
    /// * `credential` - Credential whose access token authorizes the call
    /// * `path` - Path below the API base, starting with `/`
    /// * `body` - Serialized as the JSON request body
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub(crate) async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        credential: &Credential,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self
            .http
            .post(self.api_url(path))
            .bearer_auth(&credential.access_token)
            .header(CONTENT_TYPE, "application/json")
            .json(body);
        execute(request).await
    }
}

/// Sends `request` and decodes the answer.
///
/// # Returns
///
/// - `Ok(T)` for a 2xx response whose body decodes as `T`. An empty body is
///   decoded as `{}`, so `T` must tolerate that for endpoints with no content.
/// - [`Error::Api`] for a non-2xx response carrying Spotify's error envelope
/// - [`Error::UnexpectedResponse`] for a non-2xx response with any other body
/// - [`Error::MalformedResponse`] for a 2xx response that does not decode
async fn execute<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = request.send().await?;
    let status = response.status();
    let url = response.url().path().to_string();
    let raw = response.text().await?;
    debug!(%status, %url, bytes = raw.len(), "spotify response");

    let payload = if raw.is_empty() {
        None
    } else {
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(%status, %url, error = %e, body = excerpt(&raw), "unable to parse Spotify response as JSON");
                None
            }
        }
    };

    if !status.is_success() {
        let envelope = payload.and_then(|p| serde_json::from_value::<ApiErrorBody>(p).ok());
        return Err(match envelope {
            Some(body) => Error::Api {
                status: status.as_u16(),
                message: body.error.message,
            },
            None => Error::UnexpectedResponse {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            },
        });
    }

    match payload {
        Some(value) => serde_json::from_value(value).map_err(|e| Error::MalformedResponse(e.to_string())),
        None if raw.is_empty() => serde_json::from_value(Value::Object(Default::default()))
            .map_err(|e| Error::MalformedResponse(e.to_string())),
        None => Err(Error::MalformedResponse(excerpt(&raw).to_string())),
    }
}

/// At most the first [`BODY_EXCERPT`] characters of `raw`.
pub(crate) fn excerpt(raw: &str) -> &str {
    match raw.char_indices().nth(BODY_EXCERPT) {
        Some((idx, _)) => &raw[..idx],
        None => raw,
    }
}
