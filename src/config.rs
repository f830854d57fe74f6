//! Configuration management for the Spotify remote display.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. The configuration system follows a hierarchical
//! approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)
//!
//! Unlike a process-wide set of getters, all values are read once into a
//! [`Settings`] record that the binary hands to the components it builds.

use std::{env, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use crate::{
    debug,
    error::{Error, Result},
    utils, warning,
};

pub const DEFAULT_NODE_NAME: &str = "tp-spotify";
pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:80";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SCOPE: &str = "user-read-playback-state user-modify-playback-state";
pub const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 600;

/// Returns the application's local data directory.
///
/// - Linux: `~/.local/share/spotremote`
/// - macOS: `~/Library/Application Support/spotremote`
/// - Windows: `%LOCALAPPDATA%/spotremote`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotremote");
    path
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the directory if it doesn't exist. A missing `.env` file is not an
/// error: values may come from the process environment alone.
pub async fn load_env() -> Result<()> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => debug!("Loaded environment from {}", path.display()),
        Err(e) => warning!("No usable .env at {} ({}), using process environment", path.display(), e),
    }
    Ok(())
}

/// Runtime settings of the device.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Client identifier registered with Spotify.
    pub client_id: String,
    /// Client secret registered with Spotify.
    pub client_secret: String,
    /// Host label advertised as `<node_name>.local`.
    pub node_name: String,
    /// Address the callback server binds to.
    pub server_address: SocketAddr,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    /// Space separated permission scope.
    pub scope: String,
    /// Upper bound for waiting on the authorization code.
    pub auth_timeout: Duration,
    /// Directory backing the credential store.
    pub data_dir: PathBuf,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads settings through an arbitrary lookup function.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| get(name).ok_or(Error::MissingSetting(name));
        let or_default = |name: &str, default: &str| get(name).unwrap_or_else(|| default.to_string());

        let server_address = parse_setting(
            "SPOTREMOTE_SERVER_ADDRESS",
            or_default("SPOTREMOTE_SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
        )?;

        let timeout_secs: u64 = match get("SPOTREMOTE_AUTH_TIMEOUT_SECS") {
            Some(value) => parse_setting("SPOTREMOTE_AUTH_TIMEOUT_SECS", value)?,
            None => DEFAULT_AUTH_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(Error::InvalidSetting {
                name: "SPOTREMOTE_AUTH_TIMEOUT_SECS",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            client_id: required("SPOTIFY_CLIENT_ID")?,
            client_secret: required("SPOTIFY_CLIENT_SECRET")?,
            node_name: or_default("SPOTREMOTE_NODE_NAME", DEFAULT_NODE_NAME),
            server_address,
            auth_url: or_default("SPOTIFY_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: or_default("SPOTIFY_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: or_default("SPOTIFY_API_URL", DEFAULT_API_URL),
            scope: or_default("SPOTIFY_SCOPE", DEFAULT_SCOPE),
            auth_timeout: Duration::from_secs(timeout_secs),
            data_dir: get("SPOTREMOTE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(data_dir),
        })
    }

    /// The redirect target registered with Spotify for this device.
    pub fn redirect_uri(&self) -> String {
        utils::redirect_uri(&self.node_name, self.server_address.port())
    }

    /// Link to Spotify's consent screen, embedded in the landing page.
    pub fn authorize_url(&self) -> String {
        utils::build_authorize_url(
            &self.auth_url,
            &self.client_id,
            &self.redirect_uri(),
            &self.scope,
        )
    }

    /// Address a browser on the local network should open.
    pub fn landing_url(&self) -> String {
        utils::landing_url(&self.node_name, self.server_address.port())
    }
}

fn parse_setting<T: FromStr>(name: &'static str, value: String) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::InvalidSetting { name, value })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_apply() {
        let settings = Settings::from_lookup(lookup(&[
            ("SPOTIFY_CLIENT_ID", "id"),
            ("SPOTIFY_CLIENT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(settings.node_name, "tp-spotify");
        assert_eq!(settings.server_address.port(), 80);
        assert_eq!(settings.scope, DEFAULT_SCOPE);
        assert_eq!(settings.auth_timeout, Duration::from_secs(600));
        assert_eq!(settings.redirect_uri(), "http://tp-spotify.local/callback/");
        assert_eq!(settings.landing_url(), "http://tp-spotify.local");
    }

    #[test]
    fn test_missing_client_id() {
        let err = Settings::from_lookup(lookup(&[("SPOTIFY_CLIENT_SECRET", "secret")])).unwrap_err();
        assert!(matches!(err, Error::MissingSetting("SPOTIFY_CLIENT_ID")));
    }

    #[test]
    fn test_empty_value_counts_as_unset() {
        let err = Settings::from_lookup(lookup(&[
            ("SPOTIFY_CLIENT_ID", "  "),
            ("SPOTIFY_CLIENT_SECRET", "secret"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::MissingSetting("SPOTIFY_CLIENT_ID")));
    }

    #[test]
    fn test_invalid_address_and_timeout() {
        let base = [("SPOTIFY_CLIENT_ID", "id"), ("SPOTIFY_CLIENT_SECRET", "secret")];

        let mut pairs = base.to_vec();
        pairs.push(("SPOTREMOTE_SERVER_ADDRESS", "not-an-address"));
        assert!(matches!(
            Settings::from_lookup(lookup(&pairs)),
            Err(Error::InvalidSetting { name: "SPOTREMOTE_SERVER_ADDRESS", .. })
        ));

        let mut pairs = base.to_vec();
        pairs.push(("SPOTREMOTE_AUTH_TIMEOUT_SECS", "0"));
        assert!(matches!(
            Settings::from_lookup(lookup(&pairs)),
            Err(Error::InvalidSetting { name: "SPOTREMOTE_AUTH_TIMEOUT_SECS", .. })
        ));
    }

    #[test]
    fn test_custom_port_reaches_urls() {
        let settings = Settings::from_lookup(lookup(&[
            ("SPOTIFY_CLIENT_ID", "id"),
            ("SPOTIFY_CLIENT_SECRET", "secret"),
            ("SPOTREMOTE_NODE_NAME", "kitchen"),
            ("SPOTREMOTE_SERVER_ADDRESS", "0.0.0.0:8080"),
        ]))
        .unwrap();

        assert_eq!(settings.redirect_uri(), "http://kitchen.local:8080/callback/");
        assert_eq!(settings.landing_url(), "http://kitchen.local:8080");
        assert!(settings
            .authorize_url()
            .contains("redirect_uri=http%3A%2F%2Fkitchen.local%3A8080%2Fcallback%2F"));
    }
}
