use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::server::AppState;

/// Status, version and which provider sessions are connected.
pub async fn health(Extension(state): Extension<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "connected": {
            "spotify": state.spotify.is_authenticated().await,
            "strava": state.strava.is_authenticated().await,
        }
    }))
}
