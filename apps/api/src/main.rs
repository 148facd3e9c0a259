mod config;
mod errors;
mod export;
mod generation;
mod import;
mod llm_client;
mod models;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::export::writer::ExportWriter;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::session::store::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareerKit API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.groq_api_key.clone(), config.groq_api_url.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // PDF export is disabled, not fatal, when the renderer is missing
    let pdf_renderer = config.pdf_renderer();
    if pdf_renderer.is_none() {
        warn!(
            "wkhtmltopdf not found at {}; PDF export disabled",
            config.wkhtmltopdf_path.display()
        );
    }
    let exporter = ExportWriter::new(pdf_renderer, config.export_scratch_dir.clone());

    let max_idle = chrono::Duration::minutes(i64::from(config.session_idle_minutes));
    let sessions = SessionStore::new(max_idle);

    let state = AppState {
        llm: Arc::new(llm),
        sessions,
        exporter,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the front-end host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
