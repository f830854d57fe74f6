//! # API Module
//!
//! HTTP handlers of the local authorization callback server.
//!
//! ## Endpoints
//!
//! - [`landing`] - `GET /` serves a page with a single link to Spotify's consent
//!   screen (client id, redirect URI and scope embedded as query parameters).
//! - [`callback`] - `GET /callback/` captures the `code` query parameter into the
//!   pending flow state. Answers 200 when a non-empty code is present and 404
//!   with retry instructions otherwise (including a declined consent, which
//!   arrives as `?error=access_denied`).
//! - [`favicon`] - `GET /favicon.ico` answers with a placeholder icon so browsers
//!   don't produce noisy 404s.
//! - [`not_found`] - every other request gets a 404 echoing method, path and
//!   query arguments.
//!
//! Handlers have no side effects apart from the pending flow state and the
//! response they write.

mod callback;
mod fallback;
mod landing;

pub use callback::{CALLBACK_FAILURE, CALLBACK_SUCCESS, callback};
pub use fallback::{favicon, not_found};
pub use landing::{LandingPage, landing};
