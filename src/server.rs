//! Local HTTP listener used during `topgender login`.
//!
//! It only lives between opening the browser and receiving the redirect
//! from the analysis service; see [`crate::api`] for the handlers.

use std::{net::SocketAddr, str::FromStr};

use axum::{Extension, Router, routing::get};
use tokio::net::TcpListener;

use crate::{
    api::{self, CallbackSlot},
    config,
};

/// Routes of the callback listener; `slot` receives the login outcome.
pub fn router(slot: CallbackSlot) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/", get(api::callback).layer(Extension(slot)))
}

/// Binds the callback listener. Binding happens before the browser is sent
/// anywhere, so a busy port is reported instead of losing the redirect.
pub async fn bind_callback_listener() -> Result<TcpListener, String> {
    let raw = config::callback_addr();
    let addr = SocketAddr::from_str(&raw)
        .map_err(|e| format!("Failed to parse callback address '{}': {}", raw, e))?;

    TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind callback listener on {}: {}", addr, e))
}

pub async fn serve_callbacks(listener: TcpListener, slot: CallbackSlot) {
    if let Err(e) = axum::serve(listener, router(slot)).await {
        tracing::error!(error = %e, "callback listener stopped");
    }
}
