use moodwave::{
    config::{DEFAULT_ACCOUNTS_URL, DEFAULT_API_URL, SpotifyConfig},
    error::Error,
};

#[test]
fn test_new_uses_public_spotify_hosts() {
    let config = SpotifyConfig::new("id", "secret");
    assert_eq!(config.client_id, "id");
    assert_eq!(config.client_secret, "secret");
    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(config.accounts_url, DEFAULT_ACCOUNTS_URL);
}

#[test]
fn test_with_hosts_trims_trailing_slash() {
    let config = SpotifyConfig::new("id", "secret")
        .with_hosts("http://127.0.0.1:9000/v1/", "http://127.0.0.1:9000/");
    assert_eq!(config.api_url, "http://127.0.0.1:9000/v1");
    assert_eq!(config.accounts_url, "http://127.0.0.1:9000");
}

#[test]
fn test_error_classification() {
    let not_found = Error::Api {
        status: 404,
        message: "Not found.".to_string(),
    };
    assert!(not_found.is_not_found());
    assert!(!not_found.is_unauthorized());
    assert_eq!(not_found.status(), Some(404));

    let expired = Error::UnexpectedResponse {
        status: 401,
        reason: "Unauthorized".to_string(),
    };
    assert!(expired.is_unauthorized());
    assert!(!expired.is_not_found());

    assert!(Error::NoCredential.is_unauthorized());
    assert!(Error::ReauthRequired.is_unauthorized());
    assert_eq!(Error::MalformedResponse("x".to_string()).status(), None);
    assert!(!Error::MissingConfig("SPOTIFY_CLIENT_ID").is_unauthorized());
}

#[test]
fn test_missing_config_names_the_variable() {
    let err = Error::MissingConfig("SPOTIFY_CLIENT_SECRET");
    assert!(err.to_string().contains("SPOTIFY_CLIENT_SECRET"));
}
