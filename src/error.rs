//! Error types and result alias for spotremote.

use std::net::SocketAddr;

use thiserror::Error;

/// Main error type for spotremote operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A required configuration value is not set.
    #[error("{0} must be set")]
    MissingSetting(&'static str),

    /// A configuration value could not be parsed.
    #[error("Invalid value for {name}: '{value}'")]
    InvalidSetting {
        /// Name of the environment variable.
        name: &'static str,
        /// The offending value.
        value: String,
    },

    /// Reading or writing the credential store failed.
    #[error("Credential storage failed: {0}")]
    Storage(#[from] std::io::Error),

    /// The local name could not be advertised on the network.
    #[error("Name advertisement failed: {0}")]
    Advertise(String),

    /// The callback server could not bind its listening socket.
    #[error("Failed to start callback server on {addr}: {source}")]
    ServerStart {
        /// Address the server tried to bind.
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Network or decoding failure while talking to Spotify.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The token endpoint refused the request.
    #[error("Token endpoint rejected the request ({status}): {body}")]
    Rejected {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Response body, usually an OAuth error document.
        body: String,
    },

    /// The code exchange succeeded but carried no refresh token.
    #[error("Token response did not contain a refresh token")]
    MissingRefreshToken,

    /// No refresh token is held. Run `spotremote auth` first.
    #[error("Device is not authorized. Run 'spotremote auth' to authorize it.")]
    NotAuthorized,

    /// No authorization code arrived before the flow deadline.
    #[error("Timed out waiting for the Spotify authorization code")]
    AuthorizationTimedOut,

    /// The authorization flow was cancelled by the caller.
    #[error("Authorization was cancelled")]
    AuthorizationCancelled,

    /// The Web API returned a non-success status.
    #[error("Spotify API request failed ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },
}

impl Error {
    /// Whether the failure means the held credentials are unusable and the
    /// user has to authorize the device again.
    #[must_use]
    pub fn requires_reauth(&self) -> bool {
        matches!(
            self,
            Self::NotAuthorized
                | Self::MissingRefreshToken
                | Self::Rejected { status: 400, .. }
                | Self::Rejected { status: 401, .. }
        )
    }
}

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
