use crate::{
    api::AppState, cli::spotify_client, config::ServerConfig, error, management::CredentialStore,
    server, success,
};

pub async fn serve() {
    let client = spotify_client();
    let store = match CredentialStore::new().load().await {
        Ok(store) => store,
        Err(e) => error!("Failed to load credential. Err: {}", e),
    };

    let config = ServerConfig::from_env();
    success!("Serving moodwave on http://{}", config.address);
    if let Err(e) = server::start_api_server(&config.address, AppState::new(client, store)).await {
        error!("Server stopped. Err: {}", e);
    }
}
