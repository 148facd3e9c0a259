use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::llm_client::MODEL;
use crate::models::language::Language;
use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and capabilities.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "active_sessions": state.sessions.count().await,
        "languages": Language::ALL,
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "careerkit",
        "model": MODEL,
        "pdf_export_available": state.exporter.pdf_available(),
    }))
}
