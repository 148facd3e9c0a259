// Prompt templates for the five career views.
// Placeholders use `{name}`; every template gets the language directive appended.

/// Replace: {language}, {template}, {sections}
pub const RESUME_TEMPLATE: &str = "Create {language} resume with template: {template}
    ATS-friendly, include: {sections}";

/// Replace: {language}, {resume}, {job_desc}
pub const COVER_LETTER_TEMPLATE: &str = "Write {language} cover letter for:
    Resume: {resume}
    Job: {job_desc}";

/// Replace: {position}, {company_type}, {skills}
pub const INTERVIEW_PREP_TEMPLATE: &str = "Generate interview preparation guide for:
    Position: {position}
    Company Type: {company_type}
    Technical Skills: {skills}
    Include: Common questions, STAR method examples, technical tests preparation";

/// Replace: {industry}, {experience}, {location}, {current_salary}
pub const SALARY_GUIDE_TEMPLATE: &str = "Generate salary negotiation advice for:
    Industry: {industry}
    Experience: {experience} years
    Location: {location}
    Current Salary: {current_salary}
    Include: Market rates, negotiation strategies, benefits considerations";

/// Replace: {referee_name}, {relationship}, {duration}, {achievements}, {contact_info}
pub const REFERENCE_LETTER_TEMPLATE: &str = "Write professional reference letter from:
    Referee: {referee_name}
    Relationship: {relationship}
    Duration: {duration}
    Key achievements: {achievements}
    Contact: {contact_info}";
