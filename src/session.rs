//! Session token handling and the one-time callback bootstrap.

use std::{collections::HashMap, fmt};

pub const SESSION_PARAM: &str = "session_id";
pub const ERROR_PARAM: &str = "error";

/// Opaque token handed out by the analysis service after login.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    id: String,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// The raw token, as sent in the `session_id` query parameter.
    pub fn id(&self) -> &str {
        &self.id
    }
}

// Keep tokens out of logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.id.chars().take(4).collect();
        write!(f, "Session({}…)", prefix)
    }
}

/// What the service told us when it redirected back to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    Session(Session),
    AuthError(String),
    /// Neither parameter was present (or both were empty).
    Empty,
}

impl CallbackOutcome {
    /// Reads `error` and `session_id` from a callback query. `error` wins
    /// when both are present.
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        if let Some(code) = params.get(ERROR_PARAM).map(|c| c.trim()) {
            if !code.is_empty() {
                return CallbackOutcome::AuthError(code.to_string());
            }
        }

        match params.get(SESSION_PARAM).map(|s| s.trim()) {
            Some(id) if !id.is_empty() => CallbackOutcome::Session(Session::new(id)),
            _ => CallbackOutcome::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CallbackOutcome::Empty)
    }
}

/// True when the query carries parameters that should be stripped from the
/// visible address once read.
pub fn has_transient_params(params: &HashMap<String, String>) -> bool {
    params.contains_key(SESSION_PARAM) || params.contains_key(ERROR_PARAM)
}
