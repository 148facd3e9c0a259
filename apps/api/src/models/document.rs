use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::language::Language;

/// Which of the five career views produced a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Resume,
    CoverLetter,
    InterviewGuide,
    SalaryGuide,
    ReferenceLetter,
}

impl DocumentKind {
    /// Filename stem used for downloads.
    pub fn file_stem(&self) -> &'static str {
        match self {
            DocumentKind::Resume => "resume",
            DocumentKind::CoverLetter => "cover_letter",
            DocumentKind::InterviewGuide => "interview_guide",
            DocumentKind::SalaryGuide => "salary_guide",
            DocumentKind::ReferenceLetter => "reference_letter",
        }
    }
}

/// Markdown text returned by the generation endpoint. Never inspected or edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedDocument {
    pub kind: DocumentKind,
    pub language: Language,
    pub content: String,
    pub generated_at: DateTime<Utc>,
}

impl GeneratedDocument {
    pub fn new(kind: DocumentKind, language: Language, content: String) -> Self {
        Self {
            kind,
            language,
            content,
            generated_at: Utc::now(),
        }
    }
}

/// Resume template style requested from the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResumeTemplate {
    #[default]
    Chronological,
    Functional,
    Combined,
}

impl ResumeTemplate {
    pub fn name(&self) -> &'static str {
        match self {
            ResumeTemplate::Chronological => "Chronological",
            ResumeTemplate::Functional => "Functional",
            ResumeTemplate::Combined => "Combined",
        }
    }
}

/// Employer category for interview preparation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanyType {
    #[default]
    Startup,
    Corporate,
    #[serde(rename = "Non-Profit")]
    NonProfit,
    Government,
}

impl CompanyType {
    pub fn name(&self) -> &'static str {
        match self {
            CompanyType::Startup => "Startup",
            CompanyType::Corporate => "Corporate",
            CompanyType::NonProfit => "Non-Profit",
            CompanyType::Government => "Government",
        }
    }
}
