use axum::response::Json;
use serde_json::{Value, json};

/// `/health` on the callback listener.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "listener": "callback",
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
