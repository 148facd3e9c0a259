//! Axum route handlers for the five generation views.
//!
//! Each handler holds the session lock for the whole action, makes one
//! generation call, stores the document and offers it for download in the
//! session's export format.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{ApiJson, AppError};
use crate::export::handlers::{offer_download, DownloadOffer};
use crate::generation::generator::{
    generate_cover_letter, generate_interview_guide, generate_reference_letter, generate_resume,
    generate_salary_guide, ReferenceLetterRequest, ResumeRequest, SalaryGuideRequest,
};
use crate::models::document::{CompanyType, GeneratedDocument};
use crate::session::state::{InterviewPrep, SessionState};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub document: GeneratedDocument,
    pub download: DownloadOffer,
}

#[derive(Debug, Deserialize)]
pub struct InterviewPrepRequest {
    #[serde(default)]
    pub company_type: CompanyType,
    #[serde(default)]
    pub technical_skills: String,
}

async fn finish(
    state: &AppState,
    session: &mut SessionState,
    document: GeneratedDocument,
) -> GenerateResponse {
    let download = offer_download(&state.exporter, &document, session.settings.export_format).await;
    session.store_document(document.clone());
    GenerateResponse { document, download }
}

/// POST /api/v1/sessions/:id/resume/generate
pub async fn handle_generate_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<ResumeRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let mut session = state.sessions.lock(id).await?;
    let document = generate_resume(
        state.llm.as_ref(),
        session.settings.language,
        &session.resume_data,
        req.template,
    )
    .await?;
    Ok(Json(finish(&state, &mut session, document).await))
}

/// POST /api/v1/sessions/:id/cover-letter/generate
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GenerateResponse>, AppError> {
    let mut session = state.sessions.lock(id).await?;
    let document = generate_cover_letter(
        state.llm.as_ref(),
        session.settings.language,
        &session.resume_data,
    )
    .await?;
    Ok(Json(finish(&state, &mut session, document).await))
}

/// POST /api/v1/sessions/:id/interview-prep/generate
///
/// Stores the interview-prep inputs in the session once generation succeeds.
pub async fn handle_generate_interview_prep(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<InterviewPrepRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let mut session = state.sessions.lock(id).await?;
    let prep = InterviewPrep {
        company_type: req.company_type,
        technical_skills: req.technical_skills,
    };
    let document = generate_interview_guide(
        state.llm.as_ref(),
        session.settings.language,
        &session.resume_data.job_description,
        &prep,
    )
    .await?;
    session.interview_prep = prep;
    Ok(Json(finish(&state, &mut session, document).await))
}

/// POST /api/v1/sessions/:id/salary-guide/generate
pub async fn handle_generate_salary_guide(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<SalaryGuideRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let mut session = state.sessions.lock(id).await?;
    let document =
        generate_salary_guide(state.llm.as_ref(), session.settings.language, &req).await?;
    Ok(Json(finish(&state, &mut session, document).await))
}

/// POST /api/v1/sessions/:id/references/generate
///
/// Appends to the session's reference letters.
pub async fn handle_generate_reference_letter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ApiJson(req): ApiJson<ReferenceLetterRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let mut session = state.sessions.lock(id).await?;
    let document = generate_reference_letter(
        state.llm.as_ref(),
        session.settings.language,
        &req,
        &session.resume_data.experience,
    )
    .await?;
    Ok(Json(finish(&state, &mut session, document).await))
}
