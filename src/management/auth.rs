use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::{
    debug,
    discovery::NameAdvertiser,
    error::{Error, Result},
    info,
    management::credentials::{CredentialStore, REFRESH_TOKEN_KEY},
    progress::ProgressSink,
    spotify::{AuthorizationCodeFlow, TokenEndpoint},
    success,
    types::{AccessToken, FlowOutcome, Token},
    utils, warning,
};

/// Owns the refresh token and the cached access token of the device.
///
/// The refresh token is loaded from (and written to) the [`CredentialStore`];
/// the access token lives only in memory and is renewed lazily by
/// [`current_access_token`](Self::current_access_token).
pub struct TokenManager {
    store: CredentialStore,
    endpoint: TokenEndpoint,
    refresh_token: Option<String>,
    access: Option<AccessToken>,
}

impl TokenManager {
    pub fn new(store: CredentialStore, endpoint: TokenEndpoint) -> Self {
        TokenManager {
            store,
            endpoint,
            refresh_token: None,
            access: None,
        }
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn access_token(&self) -> Option<&AccessToken> {
        self.access.as_ref()
    }

    /// Loads a persisted refresh token without starting any flow.
    pub async fn load(&mut self) -> Option<&str> {
        if self.refresh_token.is_none() {
            let stored = self.store.load(REFRESH_TOKEN_KEY).await;
            if !stored.is_empty() {
                self.refresh_token = Some(stored);
            }
        }
        self.refresh_token.as_deref()
    }

    /// Returns the refresh token, authorizing the device first if none is stored.
    ///
    /// A stored token is returned without any network activity. Otherwise the
    /// authorization flow runs, the code is exchanged and the new refresh token
    /// is persisted. Nothing is written unless the exchange succeeded.
    pub async fn ensure_authorized<A: NameAdvertiser>(
        &mut self,
        flow: &mut AuthorizationCodeFlow<A>,
        progress: &dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<String> {
        progress.report("Checking authorization status...", 60);
        if let Some(token) = self.load().await {
            info!("Using previously saved Spotify refresh token.");
            return Ok(token.to_string());
        }

        info!("No Spotify refresh token found. Requesting one through the browser via auth code.");
        progress.report("Requesting authorization...", 70);
        let code = match flow.run(progress, cancel).await? {
            FlowOutcome::Captured(code) => code,
            FlowOutcome::TimedOut => return Err(Error::AuthorizationTimedOut),
            FlowOutcome::Cancelled => return Err(Error::AuthorizationCancelled),
        };

        progress.report("Authenticating...", 80);
        let token = self.endpoint.exchange_code(&code).await.map_err(|e| {
            warning!("Authorization code exchange failed: {}", e);
            e
        })?;
        drop(code);

        let refresh = token
            .refresh_token()
            .map(str::to_string)
            .ok_or(Error::MissingRefreshToken)?;

        // A failed write only costs a new authorization after restart.
        if self.store.save(REFRESH_TOKEN_KEY, &refresh).await.is_ok() {
            debug!("Persisted refresh token {}", utils::redact(&refresh));
        }

        self.cache_access(&token);
        self.refresh_token = Some(refresh.clone());
        success!("Device authorized with Spotify");
        Ok(refresh)
    }

    /// Returns a usable access token, refreshing it first when expired.
    ///
    /// Every API call must obtain its token here. On refresh failure the
    /// previous token stays cached and the error is returned.
    pub async fn current_access_token(&mut self) -> Result<String> {
        if let Some(access) = self.access.as_ref().filter(|a| !a.is_expired()) {
            return Ok(access.value.clone());
        }

        let refresh = self.refresh_token.clone().ok_or(Error::NotAuthorized)?;
        let token = self.endpoint.refresh(&refresh).await.map_err(|e| {
            warning!("Access token refresh failed: {}", e);
            e
        })?;

        if let Some(rotated) = token.refresh_token().filter(|t| *t != refresh) {
            info!("Spotify rotated the refresh token, persisting the new one");
            if self.store.save(REFRESH_TOKEN_KEY, rotated).await.is_ok() {
                debug!("Persisted refresh token {}", utils::redact(rotated));
            }
            self.refresh_token = Some(rotated.to_string());
        }

        debug!("Access token refreshed, valid for {}s", token.expires_in);
        Ok(self.cache_access(&token).value.clone())
    }

    fn cache_access(&mut self, token: &Token) -> &AccessToken {
        self.access.insert(AccessToken::from_token(token, Utc::now()))
    }
}
