//! Top Artists Gender Breakdown Library
//!
//! Client for a gender-analysis service built on top of the Spotify Web API.
//! It signs the user in through the service, loads their top artists for
//! three listening windows and derives the gender split shown by the CLI.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the local login callback listener
//! - `cli` - Command-line interface implementations
//! - `collaborator` - HTTP client for the analysis service
//! - `config` - Configuration management and environment variables
//! - `error` - Fetch and user-facing error types
//! - `logging` - File-based `tracing` setup
//! - `management` - Per-range cache and the load orchestrator
//! - `server` - Local HTTP listener for the login callback
//! - `session` - Session token and callback parsing
//! - `stats` - Gender counts, percentages, filters and verdicts
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//! - `view` - Terminal rendering
//!
//! # Example
//!
//! ```
//! use topgender::{collaborator::HttpCollaborator, management::*, session::Session};
//!
//! #[tokio::main]
//! async fn main() -> topgender::Res<()> {
//!     topgender::config::load_env().await?;
//!     let orchestrator = LoadOrchestrator::new(HttpCollaborator::from_env(), LoadOptions::from_env());
//!     orchestrator.start_session(Session::new("token")).await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod collaborator;
pub mod config;
pub mod error;
pub mod logging;
pub mod management;
pub mod server;
pub mod session;
pub mod stats;
pub mod types;
pub mod utils;
pub mod view;

/// A convenient Result type alias for operations that may fail.
///
/// Boxed error trait object with `Send + Sync` so it can cross task
/// boundaries.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints a status line prefixed with a blue `o`.
///
/// ```
/// info!("Opening the Spotify login in your browser...");
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a confirmation line prefixed with a green check mark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints to stderr with a red `!` and exits with status 1.
///
/// Only for failures the command cannot continue from; everything after the
/// call is unreachable.
///
/// ```
/// error!("The service did not return any artists.");
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a recoverable problem to stderr with a yellow `!`.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
