use crate::{
    cli::spotify_client, error, info, management::CredentialStore, success, types::Credential,
};

/// Captures a refresh token obtained from a completed sign-in and checks it
/// right away by refreshing once.
pub async fn auth(refresh_token: String) {
    let client = spotify_client();
    let mut store = CredentialStore::new();
    store.capture(Credential::from_refresh_token(refresh_token));

    info!("Validating refresh token with Spotify...");
    match store.session(&client).await {
        Ok(credential) => success!(
            "Authentication successful! Granted scope: {}",
            if credential.scope.is_empty() { "-" } else { credential.scope.as_str() }
        ),
        Err(e) => error!("Authentication failed. Err: {}", e),
    }
}
