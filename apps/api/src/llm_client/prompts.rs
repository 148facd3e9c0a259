// Shared prompt fragments.
// Each feature that needs LLM calls defines its own prompts.rs alongside it.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT include explanations or apologies.";

/// Instruction attached to prompts that ask about a person the model cannot see.
pub const NO_FABRICATION_INSTRUCTION: &str = "\
    Only use information you can attribute to the input. \
    If a field is unknown, return an empty string or an empty list for it. \
    Do NOT invent names, employers, schools or skills.";
