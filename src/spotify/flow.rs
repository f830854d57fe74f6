use std::{net::SocketAddr, sync::Arc, time::Duration};

use tokio_util::sync::CancellationToken;

use crate::{
    api::LandingPage,
    config::Settings,
    debug,
    discovery::NameAdvertiser,
    error::Result,
    info,
    management::PendingFlow,
    progress::ProgressSink,
    server::{CallbackServer, router},
    success,
    types::{FlowOutcome, FlowState},
    utils, warning,
};

/// Options of one authorization attempt.
#[derive(Debug, Clone)]
pub struct FlowOptions {
    /// Host label advertised as `<node_name>.local`.
    pub node_name: String,
    /// Address the callback server binds to.
    pub server_address: SocketAddr,
    /// Link to the consent screen served on the landing page.
    pub authorize_url: String,
    /// Upper bound for waiting on the code.
    pub timeout: Duration,
}

impl FlowOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            node_name: settings.node_name.clone(),
            server_address: settings.server_address,
            authorize_url: settings.authorize_url(),
            timeout: settings.auth_timeout,
        }
    }
}

/// Obtains one authorization code through the browser.
///
/// A run advertises the node name, serves the landing page and callback route,
/// and waits until a code arrives, the deadline passes, or the caller cancels.
/// Server and advertisement are torn down before `run` returns, whatever the
/// outcome.
pub struct AuthorizationCodeFlow<A> {
    options: FlowOptions,
    advertiser: A,
    state: FlowState,
}

impl<A: NameAdvertiser> AuthorizationCodeFlow<A> {
    pub fn new(options: FlowOptions, advertiser: A) -> Self {
        Self {
            options,
            advertiser,
            state: FlowState::Idle,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn options(&self) -> &FlowOptions {
        &self.options
    }

    pub fn advertiser(&self) -> &A {
        &self.advertiser
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.options.timeout = timeout;
    }

    pub async fn run(&mut self, progress: &dyn ProgressSink, cancel: &CancellationToken) -> Result<FlowOutcome> {
        let name = self.options.node_name.clone();
        let addr = self.options.server_address;

        self.state = FlowState::Advertising;
        let advertised = match self.advertiser.start(&name, addr.port()) {
            Ok(()) => true,
            Err(e) => {
                warning!("{}. Continuing without a local name.", e);
                false
            }
        };

        let pending = Arc::new(PendingFlow::new());
        let landing = Arc::new(LandingPage::new(self.options.authorize_url.clone()));
        let mut server = match CallbackServer::start(addr, router(Arc::clone(&pending), landing)).await {
            Ok(server) => server,
            Err(e) => {
                self.advertiser.stop();
                self.state = FlowState::Abandoned;
                return Err(e);
            }
        };

        if advertised {
            progress.note(&format!("Open browser at\n{}", utils::landing_url(&name, server.local_addr().port())));
        } else {
            let raw = server.local_addr();
            let host = if raw.ip().is_unspecified() {
                format!("<device address>:{}", raw.port())
            } else {
                raw.to_string()
            };
            progress.note(&format!("Open browser at\nhttp://{host}/"));
        }

        self.state = FlowState::WaitingForCode;
        debug!("Waiting up to {:?} for the authorization code", self.options.timeout);
        let outcome = tokio::select! {
            code = pending.wait() => FlowOutcome::Captured(code),
            _ = cancel.cancelled() => FlowOutcome::Cancelled,
            _ = tokio::time::sleep(self.options.timeout) => FlowOutcome::TimedOut,
        };

        server.stop().await;
        if advertised {
            info!("Withdrawing local name '{}'", name);
        }
        self.advertiser.stop();

        self.state = match outcome {
            FlowOutcome::Captured(_) => {
                success!("Successfully loaded Spotify authorization code");
                FlowState::Captured
            }
            FlowOutcome::TimedOut => {
                warning!("No authorization code within {:?}", self.options.timeout);
                FlowState::Abandoned
            }
            FlowOutcome::Cancelled => {
                warning!("Authorization cancelled");
                FlowState::Abandoned
            }
        };
        Ok(outcome)
    }
}

