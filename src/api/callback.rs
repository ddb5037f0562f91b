use std::{collections::HashMap, sync::Arc};

use axum::{
    Extension,
    extract::Query,
    response::{Html, IntoResponse, Redirect, Response},
};
use tokio::sync::Mutex;

use crate::session::{self, CallbackOutcome};

pub type CallbackSlot = Arc<Mutex<Option<CallbackOutcome>>>;

/// Landing page the analysis service redirects to after the Spotify login.
///
/// The first request carrying `session_id` or `error` stores the outcome and
/// is redirected to the bare `/`, so the token does not stay in the address
/// bar or browser history. Later requests just show the result page.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(slot): Extension<CallbackSlot>,
) -> Response {
    if session::has_transient_params(&params) {
        let outcome = CallbackOutcome::from_query(&params);
        let mut lock = slot.lock().await;
        if lock.is_none() && !outcome.is_empty() {
            tracing::debug!(?outcome, "callback received");
            *lock = Some(outcome);
        }
        return Redirect::to("/").into_response();
    }

    let lock = slot.lock().await;
    match lock.as_ref() {
        Some(CallbackOutcome::Session(_)) => Html(
            "<h2>Logged in.</h2><p>You can close this window and go back to the terminal.</p>",
        )
        .into_response(),
        Some(CallbackOutcome::AuthError(_)) => {
            Html("<h4>Login failed.</h4><p>See the terminal for details.</p>").into_response()
        }
        _ => Html("<h4>Waiting for login.</h4>").into_response(),
    }
}
