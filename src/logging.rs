//! File-based diagnostic logging.
//!
//! The dashboard owns the terminal, so `tracing` output goes to a daily
//! rotating file under the data directory instead of stdout. User-facing
//! messages keep using the `info!`/`success!`/`warning!` macros.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config;

const LOG_FILE_PREFIX: &str = "topgender";

pub fn log_dir() -> PathBuf {
    config::data_dir().join("logs")
}

/// Initialize the logging system.
///
/// Logs are written to `<data dir>/topgender/logs/topgender.YYYY-MM-DD`.
/// `RUST_LOG` overrides the default filter of `topgender=debug,warn`.
pub fn init_logging() -> Result<(), std::io::Error> {
    let dir = log_dir();
    std::fs::create_dir_all(&dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The guard flushes on drop; it has to outlive every log call.
    Box::leak(Box::new(guard));

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("topgender=debug,warn"));

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();

    tracing::info!(dir = %dir.display(), "logging initialized");
    Ok(())
}
