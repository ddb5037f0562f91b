//! # API Module
//!
//! HTTP handlers for the short-lived local listener started by
//! `topgender login`.
//!
//! The analysis service runs the Spotify OAuth flow itself and finishes by
//! redirecting the browser to the client's own origin with either
//! `?session_id=<token>` or `?error=<code>`. The listener stands in for that
//! origin.
//!
//! ## Endpoints
//!
//! - [`callback`] - served at `/`; reads the transient parameters once,
//!   hands them to the waiting CLI and redirects to a clean `/`.
//! - [`health`] - liveness and version for debugging the listener.

mod callback;
mod health;

pub use callback::CallbackSlot;
pub use callback::callback;
pub use health::health;
