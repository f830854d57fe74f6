use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Seconds before the provider expiry at which an access token is retired.
///
/// Tokens living shorter than twice this margin retire at half their lifetime.
pub const EXPIRY_MARGIN_SECS: i64 = 60;

const MAX_LIFETIME_SECS: u64 = 365 * 24 * 3600;

/// Token endpoint response for both the code exchange and the refresh grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    pub expires_in: u64,
    /// Always present after a code exchange, optional on refresh.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl Token {
    /// The refresh token, treating an empty string as absent.
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Access token held in memory together with its single expiry timestamp.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
    margin: Duration,
}

impl AccessToken {
    pub fn from_token(token: &Token, obtained_at: DateTime<Utc>) -> Self {
        let lifetime = token.expires_in.min(MAX_LIFETIME_SECS) as i64;
        Self {
            value: token.access_token.clone(),
            expires_at: obtained_at + Duration::seconds(lifetime),
            margin: Duration::seconds(EXPIRY_MARGIN_SECS.min(lifetime / 2)),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at - self.margin
    }
}

/// How one run of the authorization flow ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    /// A non-empty authorization code arrived on the callback route.
    Captured(String),
    /// The deadline passed without a code.
    TimedOut,
    /// The caller cancelled the wait.
    Cancelled,
}

/// States of the authorization flow, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Advertising,
    WaitingForCode,
    Captured,
    Abandoned,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackState {
    pub is_playing: bool,
    #[serde(default)]
    pub progress_ms: Option<u64>,
    #[serde(default)]
    pub item: Option<PlaybackItem>,
    #[serde(default)]
    pub device: Option<Device>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackItem {
    pub name: String,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub artists: Vec<PlaybackArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackArtist {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    #[serde(default)]
    pub volume_percent: Option<u8>,
}
