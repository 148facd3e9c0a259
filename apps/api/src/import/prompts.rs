// Prompts for profile import.

/// System prompt for profile extraction. Sent verbatim, not templated.
pub const PROFILE_EXTRACT_SYSTEM: &str = r#"Extract professional details from LinkedIn profile in strict JSON format:
{
    "name": "Full Name",
    "experience": ["Position1 at Company1", "Position2 at Company2"],
    "education": ["Degree1 at School1", "Degree2 at School2"],
    "skills": ["Skill1", "Skill2", "Skill3"]
}"#;

/// Replace: {url}
pub const PROFILE_EXTRACT_PROMPT: &str = "Profile URL: {url}";
