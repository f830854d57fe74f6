//! # Spotify Integration Module
//!
//! Everything that talks to Spotify or drives the user through Spotify's
//! consent screen.
//!
//! ## Modules
//!
//! - [`flow`] - [`AuthorizationCodeFlow`], the one blocking stretch of the
//!   device: it advertises `<node>.local`, serves the landing page and the
//!   `/callback/` route, and waits for the authorization code until it arrives,
//!   the deadline passes, or the caller cancels.
//! - [`auth`] - [`TokenEndpoint`], the authorization-code and refresh-token
//!   grants against `POST /api/token`.
//! - [`player`] - [`SpotifyClient`], read access to the current playback.
//!
//! ## Authorization Flow
//!
//! ```text
//! Idle → Advertising → WaitingForCode → { Captured | Abandoned }
//! ```
//!
//! 1. **Advertising**: best-effort mDNS registration; failure degrades to the raw address
//! 2. **Server Start**: bind failure aborts the flow with an error
//! 3. **User Authorization**: the user opens the landing page and consents
//! 4. **Callback Handling**: the first non-empty `code` is captured
//! 5. **Teardown**: server and advertisement are stopped on every outcome
//!
//! Token exchange and persistence happen afterwards in
//! [`crate::management::TokenManager`].

pub mod auth;
pub mod flow;
pub mod player;

pub use auth::TokenEndpoint;
pub use flow::{AuthorizationCodeFlow, FlowOptions};
pub use player::SpotifyClient;
