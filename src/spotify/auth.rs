use reqwest::{Client, header::AUTHORIZATION};

use crate::{
    config::Settings,
    debug,
    error::{Error, Result},
    types::Token,
    utils,
};

/// Client of Spotify's token endpoint.
///
/// Both grants authenticate the device as a confidential client with HTTP
/// Basic credentials and send a form-encoded body.
#[derive(Debug, Clone)]
pub struct TokenEndpoint {
    client: Client,
    token_url: String,
    redirect_uri: String,
    authorization: String,
}

impl TokenEndpoint {
    pub fn new(
        client: Client,
        token_url: impl Into<String>,
        client_id: &str,
        client_secret: &str,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client,
            token_url: token_url.into(),
            redirect_uri: redirect_uri.into(),
            authorization: utils::basic_auth_header(client_id, client_secret),
        }
    }

    pub fn from_settings(client: Client, settings: &Settings) -> Self {
        Self::new(
            client,
            &settings.token_url,
            &settings.client_id,
            &settings.client_secret,
            settings.redirect_uri(),
        )
    }

    /// Exchanges an authorization code for a refresh/access token pair.
    ///
    /// The `redirect_uri` must equal the one embedded in the authorize link.
    pub async fn exchange_code(&self, code: &str) -> Result<Token> {
        debug!("Exchanging authorization code at {}", self.token_url);
        self.request(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
        ])
        .await
    }

    /// Obtains a new access token with a refresh token.
    pub async fn refresh(&self, refresh_token: &str) -> Result<Token> {
        debug!("Refreshing access token at {}", self.token_url);
        self.request(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ])
        .await
    }

    async fn request(&self, form: &[(&str, &str)]) -> Result<Token> {
        let res = self
            .client
            .post(&self.token_url)
            .header(AUTHORIZATION, &self.authorization)
            .form(form)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(Error::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(res.json::<Token>().await?)
    }
}
