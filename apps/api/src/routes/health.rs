use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version and the size of the loaded catalog.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "careermatch-api",
        "catalogSource": state.catalog.source(),
        "catalogSize": state.catalog.len(),
        "catalogLoadedAt": state.catalog.loaded_at(),
    }))
}
