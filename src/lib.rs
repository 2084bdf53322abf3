//! Spotify Track Relay Library
//!
//! This library resolves Spotify track links into display metadata and a
//! download link. It talks to the Spotify Web API for metadata and to a
//! third-party conversion proxy for the audio file, and exposes the result
//! through a small Axum HTTP server.
//!
//! # Modules
//!
//! - `api` - HTTP endpoint handlers and error mapping
//! - `config` - Configuration management and environment variables
//! - `conversion` - Conversion proxy client
//! - `error` - Error types
//! - `resolver` - The four-step track resolution pipeline
//! - `server` - Router construction and server startup
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Formatting and assembly helpers
//!
//! # Example
//!
//! ```
//! use spotirelay::{config::Settings, resolver::TrackResolver, types::TrackQuery};
//!
//! #[tokio::main]
//! async fn main() -> spotirelay::Res<()> {
//!     let settings = Settings::from_env()?;
//!     let resolver = TrackResolver::new(settings.resolver)?;
//!     let query = TrackQuery::parse("https://open.spotify.com/track/4cOdK2wGLETKBW3PvgPWqT")?;
//!     let track = resolver.resolve(&query).await?;
//!     println!("{}", track.download_link);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod conversion;
pub mod error;
pub mod resolver;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by the top-level glue (server startup, binary) where the concrete
/// error type does not matter. Library operations return their own
/// `thiserror` types instead.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Accepts the same arguments as `println!`.
///
/// ```
/// info!("Resolving {}", url);
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

/// Prints an error message to stderr with a red exclamation mark and exits
/// the program with code 1.
///
/// Only for fatal startup errors in the binary. Request handlers must never
/// use it; they report through [`warning!`] and an error response instead.
///
/// ```
/// error!("Cannot load settings. Err: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning to stderr with a yellow exclamation mark.
///
/// Used for failed resolutions and rejected requests, which are recoverable
/// from the server's point of view.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
