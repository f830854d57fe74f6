//! Spotify Remote Display Library
//!
//! This library implements the authorization and token lifecycle of a device
//! that shows Spotify playback state. The device is authorized once through a
//! browser-based OAuth2 authorization-code flow and afterwards keeps a
//! long-lived refresh token, renewing the short-lived access token on demand.
//!
//! # Modules
//!
//! - `api` - HTTP handlers served by the local callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `discovery` - Local name advertisement (`<name>.local`)
//! - `error` - Crate-wide error type
//! - `management` - Credential persistence and token lifecycle
//! - `progress` - Progress reporting sink
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Authorization flow, token endpoint and playback client
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers

pub mod api;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod management;
pub mod progress;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{Error, Result};

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Starting authentication process...");
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only the binary entry point uses this, for configuration problems that make
/// startup impossible. Library code reports failures through [`Error`] and
/// [`warning!`] instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used wherever a failure is absorbed rather than propagated, e.g. a storage
/// read that falls back to "absent" or an advertisement that could not start.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a dimmed diagnostic line when `SPOTREMOTE_DEBUG` is set.
#[macro_export]
macro_rules! debug {
  ($($arg:tt)*) => ({
    if std::env::var_os("SPOTREMOTE_DEBUG").is_some() {
      use colored::Colorize;
      println!("[{}] {}", "d".dimmed(), std::format_args!($($arg)*));
    }
  })
}
