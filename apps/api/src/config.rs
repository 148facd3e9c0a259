use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::llm_client::GROQ_API_URL;

const DEFAULT_WKHTMLTOPDF_PATH: &str = "/usr/local/bin/wkhtmltopdf";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub groq_api_url: String,
    pub wkhtmltopdf_path: PathBuf,
    pub export_scratch_dir: PathBuf,
    pub session_idle_minutes: u32,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            groq_api_url: std::env::var("GROQ_API_URL")
                .unwrap_or_else(|_| GROQ_API_URL.to_string()),
            wkhtmltopdf_path: std::env::var("WKHTMLTOPDF_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_WKHTMLTOPDF_PATH)),
            export_scratch_dir: std::env::var("EXPORT_SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| std::env::temp_dir()),
            session_idle_minutes: parse_idle_minutes(
                &std::env::var("SESSION_IDLE_MINUTES").unwrap_or_else(|_| "120".to_string()),
            )?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// The PDF renderer, if it is installed where configured.
    pub fn pdf_renderer(&self) -> Option<PathBuf> {
        self.wkhtmltopdf_path
            .is_file()
            .then(|| self.wkhtmltopdf_path.clone())
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_idle_minutes(raw: &str) -> Result<u32> {
    let minutes = raw
        .trim()
        .parse::<u32>()
        .with_context(|| format!("SESSION_IDLE_MINUTES must be a positive whole number, got '{raw}'"))?;
    if minutes == 0 {
        bail!("SESSION_IDLE_MINUTES must be greater than zero");
    }
    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_minutes_accepts_positive_values() {
        assert_eq!(parse_idle_minutes("120").unwrap(), 120);
        assert_eq!(parse_idle_minutes(" 5 ").unwrap(), 5);
    }

    #[test]
    fn test_idle_minutes_rejects_zero_negative_and_huge_values() {
        for raw in ["0", "-30", "1000000000000", "two hours", ""] {
            assert!(parse_idle_minutes(raw).is_err(), "{raw} should be rejected");
        }
    }
}
