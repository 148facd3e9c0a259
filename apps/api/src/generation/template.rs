//! Prompt templating: `{name}` placeholders, `{{` / `}}` literal braces.

use std::collections::HashMap;

use thiserror::Error;

use crate::models::language::Language;

#[derive(Debug, Error, PartialEq)]
pub enum TemplateError {
    #[error("Template references '{0}' but no value was provided")]
    MissingValue(String),

    #[error("Unclosed placeholder starting at byte {0}")]
    UnclosedPlaceholder(usize),

    #[error("Unmatched '}}' at byte {0}")]
    UnmatchedClose(usize),

    #[error("Invalid placeholder name '{0}'")]
    InvalidName(String),
}

/// Named values substituted into a prompt template.
pub type PromptContext = HashMap<&'static str, String>;

/// Substitutes every `{name}` in `template` with `values[name]`.
pub fn render(template: &str, values: &PromptContext) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' => {
                if matches!(chars.peek(), Some((_, '{'))) {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut name = String::new();
                let mut closed = false;
                for (_, nc) in chars.by_ref() {
                    if nc == '}' {
                        closed = true;
                        break;
                    }
                    name.push(nc);
                }
                if !closed {
                    return Err(TemplateError::UnclosedPlaceholder(pos));
                }
                let key = name.trim();
                if key.is_empty() || !key.chars().all(|ch| ch.is_alphanumeric() || ch == '_') {
                    return Err(TemplateError::InvalidName(name));
                }
                let value = values
                    .get(key)
                    .ok_or_else(|| TemplateError::MissingValue(key.to_string()))?;
                out.push_str(value);
            }
            '}' => {
                if matches!(chars.peek(), Some((_, '}'))) {
                    chars.next();
                    out.push('}');
                } else {
                    return Err(TemplateError::UnmatchedClose(pos));
                }
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}

/// Appends the language directive and renders the template with `language`
/// added to the values.
pub fn localize(
    template: &str,
    language: Language,
    mut values: PromptContext,
) -> Result<String, TemplateError> {
    let localized = format!("{template}{}", language.directive());
    values.insert("language", language.name().to_string());
    render(&localized, &values)
}
