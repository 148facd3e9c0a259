//! Document generation: one localized prompt, one LLM call, one document.
//!
//! Flow: task template + field values → localize() → TextGenerator → GeneratedDocument.
//! The returned text is stored as-is; nothing here parses or edits it.

use serde::Deserialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::generation::prompts::{
    COVER_LETTER_TEMPLATE, INTERVIEW_PREP_TEMPLATE, REFERENCE_LETTER_TEMPLATE, RESUME_TEMPLATE,
    SALARY_GUIDE_TEMPLATE,
};
use crate::generation::template::{localize, PromptContext};
use crate::llm_client::TextGenerator;
use crate::models::document::{DocumentKind, GeneratedDocument, ResumeTemplate};
use crate::models::language::Language;
use crate::session::state::{InterviewPrep, ResumeFields};

// ────────────────────────────────────────────────────────────────────────────
// Request bodies
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResumeRequest {
    pub template: ResumeTemplate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SalaryGuideRequest {
    pub industry: String,
    pub experience_years: u32,
    pub location: String,
    pub current_salary: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReferenceLetterRequest {
    pub referee_name: String,
    pub referee_position: String,
    pub relationship: String,
    pub duration: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Renders `template` in `language` and returns the model's text unmodified.
pub async fn generate_localized_content(
    llm: &dyn TextGenerator,
    template: &str,
    language: Language,
    values: PromptContext,
) -> Result<String, AppError> {
    let prompt = localize(template, language, values)?;
    llm.complete(None, &prompt).await.map_err(|e| {
        error!("Generation failed: {e}");
        AppError::Llm(e.to_string())
    })
}

async fn generate(
    llm: &dyn TextGenerator,
    kind: DocumentKind,
    template: &str,
    language: Language,
    values: PromptContext,
) -> Result<GeneratedDocument, AppError> {
    info!("Generating {:?} in {}", kind, language);
    let content = generate_localized_content(llm, template, language, values).await?;
    info!("{:?} generated ({} chars)", kind, content.len());
    Ok(GeneratedDocument::new(kind, language, content))
}

pub async fn generate_resume(
    llm: &dyn TextGenerator,
    language: Language,
    fields: &ResumeFields,
    template: ResumeTemplate,
) -> Result<GeneratedDocument, AppError> {
    let values = PromptContext::from([
        ("template", template.name().to_string()),
        ("sections", fields.to_prompt_block()),
    ]);
    generate(llm, DocumentKind::Resume, RESUME_TEMPLATE, language, values).await
}

pub async fn generate_cover_letter(
    llm: &dyn TextGenerator,
    language: Language,
    fields: &ResumeFields,
) -> Result<GeneratedDocument, AppError> {
    let values = PromptContext::from([
        ("resume", fields.to_prompt_block()),
        ("job_desc", fields.job_description.clone()),
    ]);
    generate(
        llm,
        DocumentKind::CoverLetter,
        COVER_LETTER_TEMPLATE,
        language,
        values,
    )
    .await
}

/// `position` is the target job description from the resume form.
pub async fn generate_interview_guide(
    llm: &dyn TextGenerator,
    language: Language,
    position: &str,
    prep: &InterviewPrep,
) -> Result<GeneratedDocument, AppError> {
    let values = PromptContext::from([
        ("position", position.to_string()),
        ("company_type", prep.company_type.name().to_string()),
        ("skills", prep.technical_skills.clone()),
    ]);
    generate(
        llm,
        DocumentKind::InterviewGuide,
        INTERVIEW_PREP_TEMPLATE,
        language,
        values,
    )
    .await
}

pub async fn generate_salary_guide(
    llm: &dyn TextGenerator,
    language: Language,
    request: &SalaryGuideRequest,
) -> Result<GeneratedDocument, AppError> {
    let values = PromptContext::from([
        ("industry", request.industry.clone()),
        ("experience", request.experience_years.to_string()),
        ("location", request.location.clone()),
        ("current_salary", request.current_salary.to_string()),
    ]);
    generate(
        llm,
        DocumentKind::SalaryGuide,
        SALARY_GUIDE_TEMPLATE,
        language,
        values,
    )
    .await
}

/// `achievements` is the experience section of the resume form.
pub async fn generate_reference_letter(
    llm: &dyn TextGenerator,
    language: Language,
    request: &ReferenceLetterRequest,
    achievements: &str,
) -> Result<GeneratedDocument, AppError> {
    let values = PromptContext::from([
        ("referee_name", request.referee_name.clone()),
        ("relationship", request.relationship.clone()),
        ("duration", request.duration.clone()),
        ("achievements", achievements.to_string()),
        ("contact_info", request.referee_position.clone()),
    ]);
    generate(
        llm,
        DocumentKind::ReferenceLetter,
        REFERENCE_LETTER_TEMPLATE,
        language,
        values,
    )
    .await
}
