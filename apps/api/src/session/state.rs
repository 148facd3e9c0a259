use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::document::{CompanyType, DocumentKind, GeneratedDocument};
use crate::models::language::{ExportFormat, Language};

/// Resume form fields. All free text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub education: String,
    pub experience: String,
    /// Comma-separated.
    pub skills: String,
    pub job_description: String,
}

impl ResumeFields {
    /// Renders the fields as a labelled block for prompt context.
    pub fn to_prompt_block(&self) -> String {
        [
            ("Name", &self.name),
            ("Email", &self.email),
            ("Phone", &self.phone),
            ("Education", &self.education),
            ("Experience", &self.experience),
            ("Skills", &self.skills),
            ("Target Job Description", &self.job_description),
        ]
        .iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterviewPrep {
    pub company_type: CompanyType,
    pub technical_skills: String,
}

/// Per-session user preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub language: Language,
    pub export_format: ExportFormat,
}

/// Everything one user has entered or generated during a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionState {
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    pub settings: Settings,
    pub resume_data: ResumeFields,
    pub interview_prep: InterviewPrep,
    pub resume: Option<GeneratedDocument>,
    pub cover_letter: Option<GeneratedDocument>,
    pub interview_guide: Option<GeneratedDocument>,
    pub salary_guide: Option<GeneratedDocument>,
    pub reference_letters: Vec<GeneratedDocument>,
}

impl Default for SessionState {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            last_active: now,
            settings: Settings::default(),
            resume_data: ResumeFields::default(),
            interview_prep: InterviewPrep::default(),
            resume: None,
            cover_letter: None,
            interview_guide: None,
            salary_guide: None,
            reference_letters: Vec::new(),
        }
    }
}

impl SessionState {
    /// Stores a freshly generated document. Reference letters accumulate;
    /// every other kind replaces its predecessor.
    pub fn store_document(&mut self, document: GeneratedDocument) {
        match document.kind {
            DocumentKind::Resume => self.resume = Some(document),
            DocumentKind::CoverLetter => self.cover_letter = Some(document),
            DocumentKind::InterviewGuide => self.interview_guide = Some(document),
            DocumentKind::SalaryGuide => self.salary_guide = Some(document),
            DocumentKind::ReferenceLetter => self.reference_letters.push(document),
        }
    }

    /// Latest document of `kind`, if one has been generated.
    pub fn document(&self, kind: DocumentKind) -> Option<&GeneratedDocument> {
        match kind {
            DocumentKind::Resume => self.resume.as_ref(),
            DocumentKind::CoverLetter => self.cover_letter.as_ref(),
            DocumentKind::InterviewGuide => self.interview_guide.as_ref(),
            DocumentKind::SalaryGuide => self.salary_guide.as_ref(),
            DocumentKind::ReferenceLetter => self.reference_letters.last(),
        }
    }
}
