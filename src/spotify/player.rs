use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::time::sleep;

use crate::{
    config::Settings,
    error::{Error, Result},
    types::PlaybackState,
    warning,
};

/// Read-only client of the player endpoints of the Web API.
///
/// Callers obtain `token` from [`crate::management::TokenManager::current_access_token`]
/// immediately before each call.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    client: Client,
    api_url: String,
}

impl SpotifyClient {
    pub fn new(client: Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(client: Client, settings: &Settings) -> Self {
        Self::new(client, &settings.api_url)
    }

    /// Current playback, or `None` when nothing is playing on any device.
    pub async fn playback(&self, token: &str) -> Result<Option<PlaybackState>> {
        let api_url = format!("{uri}/me/player", uri = self.api_url);

        loop {
            let res = self.client.get(&api_url).bearer_auth(token).send().await?;

            match res.status() {
                StatusCode::NO_CONTENT => return Ok(None),
                StatusCode::TOO_MANY_REQUESTS => {
                    let wait = res
                        .headers()
                        .get("retry-after")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.parse::<u64>().ok())
                        .unwrap_or(5);
                    warning!("Rate limited by Spotify, retrying in {}s", wait);
                    sleep(Duration::from_secs(wait)).await;
                    continue; // retry
                }
                status if status.is_success() => {
                    return Ok(Some(res.json::<PlaybackState>().await?));
                }
                status => {
                    let message = res.text().await.unwrap_or_default();
                    return Err(Error::Api {
                        status: status.as_u16(),
                        message,
                    });
                }
            }
        }
    }
}
