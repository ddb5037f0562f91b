//! Configuration management for topgender.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Every setting has a default so the
//! client works against a service running on localhost without any setup.
//!
//! The lookup order is:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Built-in defaults

use std::{env, path::PathBuf, str::FromStr, time::Duration};

use crate::{management::FailurePolicy, warning};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_CALLBACK_ADDRESS: &str = "127.0.0.1:5173";
pub const DEFAULT_PREFETCH_DELAY_MS: u64 = 1000;
pub const DEFAULT_LOGIN_TIMEOUT_SECS: u64 = 120;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates `topgender/` under the platform data directory if needed:
/// - Linux: `~/.local/share/topgender/.env`
/// - macOS: `~/Library/Application Support/topgender/.env`
/// - Windows: `%LOCALAPPDATA%/topgender/.env`
///
/// A missing `.env` file is fine; a file that exists but cannot be parsed is
/// reported as an error.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if async_fs::metadata(&path).await.is_err() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| e.to_string())
}

/// Root of everything topgender writes locally (config and logs).
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("topgender");
    path
}

/// Base URL of the analysis service, without a trailing slash.
///
/// Read from `TOPGENDER_API_URL`, e.g. `https://gender-api.example.com`.
pub fn api_url() -> String {
    env::var("TOPGENDER_API_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
        .trim_end_matches('/')
        .to_string()
}

/// Address the local callback listener binds to.
///
/// This has to be the origin the service redirects back to after login,
/// e.g. `127.0.0.1:5173`.
pub fn callback_addr() -> String {
    env::var("TOPGENDER_CALLBACK_ADDRESS")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_CALLBACK_ADDRESS.to_string())
}

/// What to do with the session when a visible load fails.
///
/// `TOPGENDER_ON_FETCH_FAILURE`: `keep_session` (default) or `clear_session`.
pub fn failure_policy() -> FailurePolicy {
    parse_or_default("TOPGENDER_ON_FETCH_FAILURE", FailurePolicy::default())
}

/// Delay between the first visible load landing and the background prefetch.
pub fn prefetch_delay() -> Duration {
    Duration::from_millis(parse_or_default(
        "TOPGENDER_PREFETCH_DELAY_MS",
        DEFAULT_PREFETCH_DELAY_MS,
    ))
}

/// How long `login` waits for the browser to come back.
pub fn login_timeout() -> Duration {
    Duration::from_secs(parse_or_default(
        "TOPGENDER_LOGIN_TIMEOUT_SECS",
        DEFAULT_LOGIN_TIMEOUT_SECS,
    ))
}

fn parse_or_default<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(e) => {
                warning!("Ignoring {}={}: {}", key, raw, e);
                default
            }
        },
        _ => default,
    }
}
