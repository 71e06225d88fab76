//! Life Dashboard Backend Library
//!
//! This library provides the backend for a personal dashboard. It proxies
//! Spotify, Strava and OpenWeatherMap behind a small HTTP API, keeps the
//! OAuth sessions for the two authenticated providers in memory, and reshapes
//! upstream JSON into flat view models the dashboard can render directly.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the dashboard endpoints and OAuth redirects
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error types for upstream calls
//! - `management` - OAuth token sessions and dashboard data sources
//! - `server` - Router assembly and HTTP listener
//! - `spotify` - Spotify now-playing and playlist projections
//! - `strava` - Strava activity summary projection
//! - `types` - Data structures and type definitions
//! - `utils` - Pace, distance and date helpers
//! - `weather` - OpenWeatherMap current conditions projection
//!
//! # Example
//!
//! ```
//! use lifedash::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> lifedash::Res<()> {
//!     config::load_env().await?;
//!     server::start_api_server(config::Settings::from_env()).await
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod strava;
pub mod types;
pub mod utils;
pub mod weather;

/// A convenient Result type alias for startup operations that may fail.
///
/// Used where the concrete error does not matter to the caller, such as
/// loading the environment or binding the listener. Upstream calls use the
/// typed [`error::Error`] instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Backend server running on http://localhost:{}", port);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Used when an OAuth exchange or a token refresh completes.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for fatal startup failures. Request handlers never call this;
/// they log with [`warning!`] and answer with an error response instead.
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
/// Every upstream failure is reported through this macro before it is turned
/// into a generic error response.
///
/// # Example
///
/// ```
/// warning!("Spotify API error: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
