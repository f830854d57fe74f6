use serde_json::json;
use spotremote::{
    cli::{self, Context},
    config::Settings,
    management::{CredentialStore, REFRESH_TOKEN_KEY},
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, method, path},
};

fn settings(provider: &MockServer, data_dir: &std::path::Path) -> Settings {
    let token_url = format!("{}/api/token", provider.uri());
    let data_dir = data_dir.display().to_string();
    Settings::from_lookup(|name| match name {
        "SPOTIFY_CLIENT_ID" => Some("id".to_string()),
        "SPOTIFY_CLIENT_SECRET" => Some("secret".to_string()),
        "SPOTIFY_TOKEN_URL" => Some(token_url.clone()),
        "SPOTREMOTE_SERVER_ADDRESS" => Some("127.0.0.1:0".to_string()),
        "SPOTREMOTE_DATA_DIR" => Some(data_dir.clone()),
        _ => None,
    })
    .unwrap()
}

#[tokio::test]
async fn test_auth_with_stored_token_logs_in() {
    let provider = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token"))
        .and(body_string_contains("refresh_token=rt-saved"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "at-1",
            "token_type": "Bearer",
            "expires_in": 3600,
        })))
        .expect(1)
        .mount(&provider)
        .await;

    let dir = tempfile::tempdir().unwrap();
    CredentialStore::new(dir.path())
        .save(REFRESH_TOKEN_KEY, "rt-saved")
        .await
        .unwrap();

    let mut ctx = Context::new(settings(&provider, dir.path()));
    cli::auth(&mut ctx, Some(1), false).await.unwrap();

    assert_eq!(ctx.tokens.access_token().unwrap().value, "at-1");
    assert_eq!(ctx.tokens.refresh_token(), Some("rt-saved"));
}
