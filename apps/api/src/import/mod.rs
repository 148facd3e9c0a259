// Profile import: one LLM call, JSON extraction, required-key check.

pub mod handlers;
pub mod linkedin;
pub mod prompts;
