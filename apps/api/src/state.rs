use std::sync::Arc;

use crate::export::writer::ExportWriter;
use crate::llm_client::TextGenerator;
use crate::session::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Generation endpoint. `LlmClient` in production.
    pub llm: Arc<dyn TextGenerator>,
    pub sessions: SessionStore,
    pub exporter: ExportWriter,
}
