//! # CLI Module
//!
//! Command implementations of the `spotremote` binary.
//!
//! ## Commands
//!
//! - [`auth`] - Startup sequence of the device: load the stored refresh token or
//!   run the browser authorization, then log in by fetching an access token
//! - [`token`] - Print a valid access token, refreshing it when expired
//! - [`status`] - Show the current playback once or periodically
//!
//! ## Composition
//!
//! [`Context`] is built once in `main` from the [`Settings`] and owns the single
//! credential store, token manager and authorization flow of the process.
//! Commands borrow it; there is no global state.

mod auth;
mod status;
mod token;

use reqwest::Client;
use tokio_util::sync::CancellationToken;

use crate::{
    config::Settings,
    discovery::MdnsAdvertiser,
    management::{CredentialStore, TokenManager},
    progress::ConsoleProgress,
    spotify::{AuthorizationCodeFlow, FlowOptions, SpotifyClient, TokenEndpoint},
};

pub use auth::auth;
pub use status::status;
pub use token::token;

/// Components of one device process.
pub struct Context {
    pub settings: Settings,
    pub tokens: TokenManager,
    pub flow: AuthorizationCodeFlow<MdnsAdvertiser>,
    pub spotify: SpotifyClient,
    pub progress: ConsoleProgress,
    pub cancel: CancellationToken,
}

impl Context {
    pub fn new(settings: Settings) -> Self {
        let client = Client::new();
        let store = CredentialStore::new(&settings.data_dir);
        let tokens = TokenManager::new(store, TokenEndpoint::from_settings(client.clone(), &settings));
        let flow = AuthorizationCodeFlow::new(FlowOptions::from_settings(&settings), MdnsAdvertiser::new());
        let spotify = SpotifyClient::from_settings(client, &settings);

        Self {
            settings,
            tokens,
            flow,
            spotify,
            progress: ConsoleProgress::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Cancels pending waits when the user presses Ctrl-C.
    pub fn cancel_on_ctrl_c(&self) {
        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }
}
