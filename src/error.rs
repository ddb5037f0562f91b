use std::fmt;

use reqwest::StatusCode;

use crate::types::TimeRange;

pub const LOGIN_FAILED_MESSAGE: &str = "Could not start the login. Please try again.";
pub const FETCH_FAILED_MESSAGE: &str = "Could not load your artists. Please try again.";

/// Anything that can go wrong while talking to the analysis service.
#[derive(Debug)]
pub enum FetchError {
    Transport(reqwest::Error),
    Status(StatusCode),
    /// The body was not the JSON shape we expect.
    Decode(reqwest::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(e) => write!(f, "transport error: {}", e),
            FetchError::Status(status) => write!(f, "service answered {}", status),
            FetchError::Decode(e) => write!(f, "unexpected response body: {}", e),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Transport(e) | FetchError::Decode(e) => Some(e),
            FetchError::Status(_) => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return FetchError::Status(status);
        }
        if err.is_decode() {
            return FetchError::Decode(err);
        }
        FetchError::Transport(err)
    }
}

/// User-facing failures. Network errors are converted into one of these at
/// the orchestrator boundary and never reach the view as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// The service redirected back with `?error=<code>`.
    AuthRedirect(String),
    /// `/login` itself failed before any redirect.
    LoginInitiation,
    ForegroundFetch(TimeRange),
    /// Never shown; kept so logs and outcomes can name it.
    BackgroundFetch(TimeRange),
    CallbackTimeout,
    Config(String),
}

impl AppError {
    /// The sentence shown to the user. Never contains transport details;
    /// those go to the log.
    pub fn user_message(&self) -> String {
        match self {
            AppError::AuthRedirect(code) => format!("Authentication error: {}", code),
            AppError::LoginInitiation => LOGIN_FAILED_MESSAGE.to_string(),
            AppError::ForegroundFetch(_) | AppError::BackgroundFetch(_) => {
                FETCH_FAILED_MESSAGE.to_string()
            }
            AppError::CallbackTimeout => {
                "Timed out waiting for the login to complete in the browser.".to_string()
            }
            AppError::Config(msg) => format!("Configuration error: {}", msg),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ForegroundFetch(range) => {
                write!(f, "loading {} failed", range)
            }
            AppError::BackgroundFetch(range) => {
                write!(f, "background load of {} failed", range)
            }
            other => f.write_str(&other.user_message()),
        }
    }
}

impl std::error::Error for AppError {}
