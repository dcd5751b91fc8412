//! Access-token lifecycle.
//!
//! Credentials are values: [`is_valid`] inspects one, [`SpotifyClient::refresh`]
//! produces the next one. Storing the result is up to the caller, see
//! [`CredentialStore`](crate::management::CredentialStore).
//!
//! ## Refresh request
//!
//! ```text
//! POST {accounts_url}/api/token
//! Authorization: Basic base64(client_id:client_secret)
//! Content-Type: application/x-www-form-urlencoded
//!
//! grant_type=refresh_token&refresh_token=<token>
//! ```

use chrono::{DateTime, Utc};
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    types::{Credential, CredentialError, TokenResponse},
    utils,
};

use super::{SpotifyClient, excerpt};

/// Used when the token endpoint omits `expires_in`.
const DEFAULT_EXPIRES_IN: f64 = 3600.0;

/// True iff `now` is strictly before the access-token expiry. Reaching the
/// expiry instant counts as expired.
///
/// # Arguments
///
/// * `credential` - Credential to check, its error flag is not looked at
/// * `now` - Reference time
///
/// # Returns
///
/// `false` once the credential must be refreshed before its next use.
pub fn is_valid(credential: &Credential, now: DateTime<Utc>) -> bool {
    now.timestamp_millis() < credential.access_token_expires
}

impl SpotifyClient {
    /// Exchanges the stored refresh token for a new access token.
    ///
    /// Never fails: transport errors, non-2xx responses and undecodable bodies
    /// all come back as a copy of `credential` carrying
    /// [`CredentialError::RefreshAccessTokenError`]. The caller has to send the
    /// user back to sign-in; nothing here retries.
    ///
    /// On success the access token, expiry, refresh token (when rotated), token
    /// type and scope are taken from the response, falling back to the previous
    /// values for anything the response leaves out. The error flag is cleared.
    ///
    /// # Arguments
    ///
    /// * `credential` - Credential whose refresh token is exchanged. It is
    ///   neither modified nor checked for expiry.
    ///
    /// # Returns
    ///
    /// The credential to store in place of `credential`. Check
    /// [`Credential::needs_reauth`] to tell a rotated credential from a failed
    /// refresh.
    ///
    /// # Expiry
    ///
    /// `expires_in` may be any JSON number and defaults to one hour. The
    /// resulting timestamp saturates instead of overflowing.
    pub async fn refresh(&self, credential: &Credential) -> Credential {
        self.refresh_at(credential, Utc::now()).await
    }

    /// [`refresh`](Self::refresh) with an explicit clock, expiry is computed
    /// from `now`.
    ///
    /// # Arguments
    ///
    /// * `credential` - Credential whose refresh token is exchanged
    /// * `now` - Time the new expiry is counted from
    pub async fn refresh_at(&self, credential: &Credential, now: DateTime<Utc>) -> Credential {
        match self.request_token(&credential.refresh_token).await {
            Ok(response) => {
                debug!("access token refreshed");
                rotate(credential, response, now)
            }
            Err(e) => {
                warn!(error = %e, "Spotify token refresh failed");
                credential.with_error(CredentialError::RefreshAccessTokenError)
            }
        }
    }

    /// # Errors
    ///
    /// - [`Error::Transport`] when the accounts host cannot be reached
    /// - [`Error::MalformedResponse`] for a body that is not a JSON token response
    /// - [`Error::Api`] for a non-2xx answer, with `error_description` when present
    async fn request_token(&self, refresh_token: &str) -> Result<TokenResponse> {
        let basic = utils::basic_auth_header(&self.config.client_id, &self.config.client_secret);
        let response = self
            .http
            .post(format!("{}/api/token", self.config.accounts_url))
            .header(AUTHORIZATION, format!("Basic {basic}"))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        let data: Value = serde_json::from_str(&text)
            .map_err(|_| Error::MalformedResponse(excerpt(&text).to_string()))?;

        if !status.is_success() {
            let message = data["error_description"]
                .as_str()
                .unwrap_or("Failed to refresh token")
                .to_string();
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_value(data).map_err(|e| Error::MalformedResponse(e.to_string()))
    }
}

fn rotate(previous: &Credential, response: TokenResponse, now: DateTime<Utc>) -> Credential {
    let expires_in = response.expires_in.unwrap_or(DEFAULT_EXPIRES_IN);
    Credential {
        access_token: response
            .access_token
            .unwrap_or_else(|| previous.access_token.clone()),
        access_token_expires: expires_at(now, expires_in),
        refresh_token: response
            .refresh_token
            .unwrap_or_else(|| previous.refresh_token.clone()),
        token_type: response
            .token_type
            .unwrap_or_else(|| previous.token_type.clone()),
        scope: response.scope.unwrap_or_else(|| previous.scope.clone()),
        error: None,
    }
}

/// Absolute expiry in epoch milliseconds, `expires_in` seconds after `now`.
///
/// Float to integer casts saturate, so oversized lifetimes pin the expiry at
/// `i64::MAX` and negative ones produce an already expired credential.
fn expires_at(now: DateTime<Utc>, expires_in: f64) -> i64 {
    let lifetime_ms = (expires_in * 1000.0).round() as i64;
    now.timestamp_millis().saturating_add(lifetime_ms)
}
