use std::path::PathBuf;

use chrono::Utc;

use crate::{
    error::{Error, Result},
    spotify::{SpotifyClient, auth},
    types::Credential,
};

/// Holds and persists the session credential for the CLI and the local server.
///
/// The Spotify client never stores credentials; this is where a refreshed
/// credential replaces the old one.
pub struct CredentialStore {
    path: PathBuf,
    credential: Option<Credential>,
}

impl CredentialStore {
    /// Store backed by `<data_local_dir>/moodwave/cache/credential.json`.
    pub fn new() -> Self {
        Self::at(Self::default_path())
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            credential: None,
        }
    }

    /// Reads the credential file. A missing file leaves the store empty.
    pub async fn load(mut self) -> Result<Self> {
        if !self.path.is_file() {
            self.credential = None;
            return Ok(self);
        }
        let content = async_fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::Store(e.to_string()))?;
        let credential: Credential =
            serde_json::from_str(&content).map_err(|e| Error::Store(e.to_string()))?;
        self.credential = Some(credential);
        Ok(self)
    }

    pub async fn persist(&self) -> Result<()> {
        let Some(credential) = &self.credential else {
            return Ok(());
        };
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::Store(e.to_string()))?;
        }

        let json =
            serde_json::to_string_pretty(credential).map_err(|e| Error::Store(e.to_string()))?;
        async_fs::write(&self.path, json)
            .await
            .map_err(|e| Error::Store(e.to_string()))
    }

    /// Replaces the held credential, e.g. after a fresh sign-in.
    pub fn capture(&mut self, credential: Credential) -> &mut Self {
        self.credential = Some(credential);
        self
    }

    pub fn current(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    /// A credential that is safe to use right now.
    ///
    /// Expired credentials are refreshed and the result is stored and
    /// persisted, whether the refresh worked or not. A credential tagged by a
    /// failed refresh is never refreshed again.
    ///
    /// # Errors
    ///
    /// - [`Error::NoCredential`] when nothing was captured yet
    /// - [`Error::ReauthRequired`] when the credential carries the refresh error flag
    /// - [`Error::Store`] when persisting the refreshed credential fails
    pub async fn session(&mut self, client: &SpotifyClient) -> Result<Credential> {
        let current = self.credential.as_ref().ok_or(Error::NoCredential)?;
        if current.needs_reauth() {
            return Err(Error::ReauthRequired);
        }
        if auth::is_valid(current, Utc::now()) {
            return Ok(current.clone());
        }

        let refreshed = client.refresh(current).await;
        self.credential = Some(refreshed.clone());
        self.persist().await?;

        if refreshed.needs_reauth() {
            return Err(Error::ReauthRequired);
        }
        Ok(refreshed)
    }

    fn default_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("moodwave/cache/credential.json");
        path
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}
