//! Axum route handler for profile import.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::errors::{ApiJson, AppError};
use crate::import::linkedin::{apply_profile, linkedin_import, ImportRequest};
use crate::session::state::ResumeFields;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub imported: bool,
    pub profile: Map<String, Value>,
    pub error: Option<String>,
    pub resume_data: ResumeFields,
}

/// POST /api/v1/sessions/:id/import/linkedin
///
/// Import failures are not HTTP errors: the response carries an empty
/// profile, the message, and the unchanged resume form.
pub async fn handle_linkedin_import(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<ImportRequest>,
) -> Result<Json<ImportResponse>, AppError> {
    if req.url.trim().is_empty() {
        return Err(AppError::Validation("url cannot be empty".to_string()));
    }

    // The prefix check runs on the URL exactly as submitted.
    let mut session = state.sessions.lock(id).await?;
    let outcome = linkedin_import(&req.url, state.llm.as_ref()).await;
    let imported = !outcome.is_empty();
    if imported {
        apply_profile(&mut session.resume_data, &outcome.profile);
    }

    Ok(Json(ImportResponse {
        imported,
        profile: outcome.profile,
        error: outcome.error,
        resume_data: session.resume_data.clone(),
    }))
}
