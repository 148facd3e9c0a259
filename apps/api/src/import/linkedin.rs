//! LinkedIn profile import: asks the model for a fixed JSON shape and
//! flattens the answer into the resume form.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{info, warn};

use crate::generation::template::{render, PromptContext, TemplateError};
use crate::import::prompts::{PROFILE_EXTRACT_PROMPT, PROFILE_EXTRACT_SYSTEM};
use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, NO_FABRICATION_INSTRUCTION};
use crate::llm_client::{LlmError, TextGenerator};
use crate::session::state::ResumeFields;

pub const LINKEDIN_PROFILE_PREFIX: &str = "https://www.linkedin.com/in/";
pub const REQUIRED_FIELDS: [&str; 4] = ["name", "experience", "education", "skills"];

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid LinkedIn profile URL format")]
    InvalidUrl,

    #[error("Generation failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Prompt error: {0}")]
    Template(#[from] TemplateError),

    #[error("No valid JSON found in response")]
    NoJson,

    #[error("Response JSON could not be parsed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Response JSON is not an object")]
    NotAnObject,

    #[error("Missing required fields in parsed data: {}", .0.join(", "))]
    MissingFields(Vec<String>),
}

#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub url: String,
}

/// Result of an import attempt. On failure `profile` is empty and `error`
/// carries the message for the user.
#[derive(Debug, Default, Serialize)]
pub struct ImportOutcome {
    pub profile: Map<String, Value>,
    pub error: Option<String>,
}

impl ImportOutcome {
    pub fn is_empty(&self) -> bool {
        self.profile.is_empty()
    }
}

/// Imports a profile. Never fails: every error becomes an empty profile
/// plus a message.
pub async fn linkedin_import(url: &str, llm: &dyn TextGenerator) -> ImportOutcome {
    match try_linkedin_import(url, llm).await {
        Ok(profile) => {
            info!("Profile imported ({} fields)", profile.len());
            ImportOutcome {
                profile,
                error: None,
            }
        }
        Err(e) => {
            warn!("LinkedIn import error: {e}");
            ImportOutcome {
                profile: Map::new(),
                error: Some(format!("LinkedIn import error: {e}")),
            }
        }
    }
}

pub async fn try_linkedin_import(
    url: &str,
    llm: &dyn TextGenerator,
) -> Result<Map<String, Value>, ImportError> {
    if !url.starts_with(LINKEDIN_PROFILE_PREFIX) {
        return Err(ImportError::InvalidUrl);
    }

    let prompt = render(
        PROFILE_EXTRACT_PROMPT,
        &PromptContext::from([("url", url.to_string())]),
    )?;
    let system =
        format!("{PROFILE_EXTRACT_SYSTEM}\n\n{NO_FABRICATION_INSTRUCTION}\n{JSON_ONLY_SYSTEM}");
    let response = llm.complete(Some(&system), &prompt).await?;

    extract_profile_json(&response)
}

fn json_block_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("static pattern is valid"))
}

/// Finds the outermost brace-delimited span (greedy, across lines), parses
/// it and checks the required keys. Values are returned untouched.
pub fn extract_profile_json(response: &str) -> Result<Map<String, Value>, ImportError> {
    let block = json_block_pattern()
        .find(response)
        .ok_or(ImportError::NoJson)?
        .as_str();

    let parsed: Value = serde_json::from_str(block)?;
    let Value::Object(profile) = parsed else {
        return Err(ImportError::NotAnObject);
    };

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !profile.contains_key(**field))
        .map(|field| field.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ImportError::MissingFields(missing));
    }

    Ok(profile)
}

/// Copies an imported profile into the resume form. Experience and
/// education become one line per item, skills a comma-separated list.
pub fn apply_profile(fields: &mut ResumeFields, profile: &Map<String, Value>) {
    fields.name = profile
        .get("name")
        .map(value_to_text)
        .unwrap_or_default();
    fields.experience = join_items(profile.get("experience"), "\n");
    fields.education = join_items(profile.get("education"), "\n");
    fields.skills = join_items(profile.get("skills"), ", ");
}

fn join_items(value: Option<&Value>, separator: &str) -> String {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(value_to_text)
            .collect::<Vec<_>>()
            .join(separator),
        Some(other) => value_to_text(other),
        None => String::new(),
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedGenerator;
    use serde_json::json;

    const PROFILE_URL: &str = "https://www.linkedin.com/in/ada-lovelace";

    const FULL_RESPONSE: &str = r#"Here is the profile:
{
    "name": "Ada Lovelace",
    "experience": ["Analyst at Analytical Engine Co", "Translator at Royal Society"],
    "education": ["Mathematics at Private Tutoring"],
    "skills": ["Mathematics", "Programming"]
}
Let me know if you need anything else."#;

    #[tokio::test]
    async fn test_url_without_prefix_yields_empty_profile() {
        let llm = ScriptedGenerator::replying(FULL_RESPONSE);
        for url in [
            "http://www.linkedin.com/in/ada",
            "https://linkedin.com/in/ada",
            "https://www.linkedin.com/company/acme",
            "",
        ] {
            let outcome = linkedin_import(url, &llm).await;
            assert!(outcome.is_empty(), "{url} should be rejected");
            assert!(outcome.error.unwrap().contains("Invalid LinkedIn profile URL"));
        }
        assert_eq!(llm.calls(), 0, "rejected URLs must not reach the model");
    }

    #[tokio::test]
    async fn test_well_formed_response_returns_fields_verbatim() {
        let llm = ScriptedGenerator::replying(FULL_RESPONSE);
        let outcome = linkedin_import(PROFILE_URL, &llm).await;

        assert!(outcome.error.is_none());
        assert_eq!(outcome.profile["name"], json!("Ada Lovelace"));
        assert_eq!(
            outcome.profile["experience"],
            json!(["Analyst at Analytical Engine Co", "Translator at Royal Society"])
        );
        assert_eq!(outcome.profile["skills"], json!(["Mathematics", "Programming"]));
        assert_eq!(outcome.profile.len(), 4);
    }

    #[tokio::test]
    async fn test_missing_required_key_yields_empty_profile() {
        let llm = ScriptedGenerator::replying(
            r#"{"name": "Ada", "experience": [], "education": []}"#,
        );
        let outcome = linkedin_import(PROFILE_URL, &llm).await;
        assert!(outcome.is_empty());
        assert!(outcome.error.unwrap().contains("skills"));
    }

    #[tokio::test]
    async fn test_response_without_json_yields_empty_profile() {
        let llm = ScriptedGenerator::replying("I cannot access LinkedIn profiles.");
        let outcome = linkedin_import(PROFILE_URL, &llm).await;
        assert!(outcome.is_empty());
        assert!(outcome.error.unwrap().contains("No valid JSON"));
    }

    #[tokio::test]
    async fn test_upstream_failure_yields_empty_profile() {
        let llm = ScriptedGenerator::failing(502);
        let outcome = linkedin_import(PROFILE_URL, &llm).await;
        assert!(outcome.is_empty());
        assert!(outcome.error.is_some());
    }

    #[tokio::test]
    async fn test_prompt_carries_url_and_schema() {
        let llm = ScriptedGenerator::replying(FULL_RESPONSE);
        linkedin_import(PROFILE_URL, &llm).await;

        assert_eq!(
            llm.last_prompt().unwrap(),
            format!("Profile URL: {PROFILE_URL}")
        );
        let system = llm.systems.lock().unwrap()[0].clone().unwrap();
        assert!(system.contains(r#""skills": ["Skill1", "Skill2", "Skill3"]"#));
        assert!(system.contains("Do NOT invent"));
    }

    #[test]
    fn test_greedy_scan_spans_multiple_blocks() {
        // Two objects side by side are captured as one span, which is not valid JSON.
        let err = extract_profile_json(r#"{"name": "A"} and {"skills": []}"#).unwrap_err();
        assert!(matches!(err, ImportError::Parse(_)));
    }

    #[test]
    fn test_nested_braces_are_kept_inside_the_span() {
        let profile = extract_profile_json(
            r#"```json
{"name": "A", "experience": [{"role": "X"}], "education": [], "skills": []}
```"#,
        )
        .unwrap();
        assert_eq!(profile["experience"], json!([{"role": "X"}]));
    }

    #[test]
    fn test_no_type_checking_on_required_keys() {
        let profile =
            extract_profile_json(r#"{"name": 7, "experience": "x", "education": null, "skills": {}}"#)
                .unwrap();
        assert_eq!(profile["name"], json!(7));
    }

    #[test]
    fn test_apply_profile_flattens_lists() {
        let profile = extract_profile_json(FULL_RESPONSE).unwrap();
        let mut fields = ResumeFields {
            email: "kept@example.com".to_string(),
            ..Default::default()
        };
        apply_profile(&mut fields, &profile);

        assert_eq!(fields.name, "Ada Lovelace");
        assert_eq!(
            fields.experience,
            "Analyst at Analytical Engine Co\nTranslator at Royal Society"
        );
        assert_eq!(fields.education, "Mathematics at Private Tutoring");
        assert_eq!(fields.skills, "Mathematics, Programming");
        assert_eq!(fields.email, "kept@example.com");
    }
}
