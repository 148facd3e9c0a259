pub mod document;
pub mod language;
