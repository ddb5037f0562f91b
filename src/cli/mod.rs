//! # CLI Module
//!
//! User-facing commands of topgender. Each command wires the configuration,
//! the HTTP collaborator and the [`LoadOrchestrator`](crate::management::LoadOrchestrator)
//! together and prints through the [`view`](crate::view) functions.
//!
//! ## Commands
//!
//! - [`login`] - signs in through the analysis service, then opens the
//!   interactive dashboard
//! - [`dashboard`] - interactive dashboard for an existing session token
//! - [`show`] - prints the breakdown of one time range and exits
//! - [`status`] - checks that the analysis service is reachable
//!
//! ## Layering
//!
//! ```text
//! CLI (commands, prompt loop, spinners)
//!     ↓
//! Management (load orchestrator, per-range cache)
//!     ↓
//! Collaborator (HTTP client for the analysis service)
//! ```
//!
//! Failures are reported with the `warning!`/`error!` macros; details go to
//! the log file.

mod dashboard;
mod login;
mod show;
mod status;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub use dashboard::Action;
pub use dashboard::dashboard;
pub use dashboard::parse_action;
pub use login::login;
pub use show::show;
pub use status::status;

pub(crate) fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
