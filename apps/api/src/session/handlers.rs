//! Axum route handlers for session lifecycle and form fields.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ApiJson, AppError};
use crate::models::language::{ExportFormat, Language};
use crate::session::state::{ResumeFields, SessionState, Settings};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub settings: Settings,
    pub pdf_export_available: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub language: Option<Language>,
    pub export_format: Option<ExportFormat>,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let session_id = state.sessions.create().await;
    (
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id,
            settings: Settings::default(),
            pdf_export_available: state.exporter.pdf_available(),
        }),
    )
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionState>, AppError> {
    let session = state.sessions.lock(id).await?;
    Ok(Json(session.clone()))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {id} not found")))
    }
}

/// PUT /api/v1/sessions/:id/settings
///
/// Only the fields present in the body change.
pub async fn handle_update_settings(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<UpdateSettingsRequest>,
) -> Result<Json<Settings>, AppError> {
    let mut session = state.sessions.lock(id).await?;
    if let Some(language) = req.language {
        session.settings.language = language;
    }
    if let Some(export_format) = req.export_format {
        session.settings.export_format = export_format;
    }
    Ok(Json(session.settings))
}

/// PUT /api/v1/sessions/:id/resume
///
/// Replaces the resume form; omitted fields become empty.
pub async fn handle_update_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(fields): ApiJson<ResumeFields>,
) -> Result<Json<ResumeFields>, AppError> {
    let mut session = state.sessions.lock(id).await?;
    session.resume_data = fields;
    Ok(Json(session.resume_data.clone()))
}
