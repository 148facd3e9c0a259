// Document generation for the five career views.
// All LLM calls go through llm_client::TextGenerator.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod template;
