//! Export Writer: turns generated text into a downloadable file.
//!
//! Every export goes through a scratch file in `scratch_dir`. Scratch files
//! are `TempPath`s, so they are removed when the export returns, whether it
//! succeeded or not.

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine};
use tempfile::TempPath;
use thiserror::Error;
use tracing::{info, warn};

use crate::export::docx::build_docx;
use crate::export::pdf::{html_page, render_pdf};
use crate::models::language::ExportFormat;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF export requires wkhtmltopdf installation")]
    RendererUnavailable,

    #[error("PDF renderer failed (exit code {code:?}): {stderr}")]
    RendererFailed { code: Option<i32>, stderr: String },

    #[error("DOCX packaging failed: {0}")]
    Docx(#[from] zip::result::ZipError),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The finished file, ready to send to the user.
#[derive(Debug, Clone)]
pub struct ExportedFile {
    pub filename: String,
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
}

impl ExportedFile {
    /// Same-page hyperlink carrying the file as a base64 `data:` URL.
    pub fn download_link(&self) -> String {
        format!(
            r#"<a href="data:application/octet-stream;base64,{}" download="{}">Download {}</a>"#,
            STANDARD.encode(&self.bytes),
            self.filename,
            self.format.extension().to_uppercase()
        )
    }
}

#[derive(Debug, Clone)]
pub struct ExportWriter {
    pdf_renderer: Option<PathBuf>,
    scratch_dir: PathBuf,
}

impl ExportWriter {
    pub fn new(pdf_renderer: Option<PathBuf>, scratch_dir: PathBuf) -> Self {
        Self {
            pdf_renderer,
            scratch_dir,
        }
    }

    pub fn pdf_available(&self) -> bool {
        self.pdf_renderer.as_deref().is_some_and(Path::is_file)
    }

    /// Serializes `content` as `format` and returns the bytes of `<stem>.<ext>`.
    pub async fn export(
        &self,
        content: &str,
        format: ExportFormat,
        stem: &str,
    ) -> Result<ExportedFile, ExportError> {
        let stem = sanitize_stem(stem);
        let output = self.scratch_file(&stem, format.extension())?;

        match format {
            ExportFormat::Txt => tokio::fs::write(&output, content.as_bytes()).await?,
            ExportFormat::Docx => {
                let package = build_docx(content)?;
                tokio::fs::write(&output, package).await?;
            }
            ExportFormat::Pdf => {
                let renderer = self
                    .pdf_renderer
                    .as_deref()
                    .filter(|p| p.is_file())
                    .ok_or(ExportError::RendererUnavailable)?;
                let html = self.scratch_file(&stem, "html")?;
                tokio::fs::write(&html, html_page(content)).await?;
                render_pdf(renderer, &html, &output).await?;
                release(html);
            }
        }

        let bytes = tokio::fs::read(&output).await?;
        release(output);

        let filename = format!("{stem}.{}", format.extension());
        info!("Exported {filename} ({} bytes)", bytes.len());
        Ok(ExportedFile {
            filename,
            format,
            bytes,
        })
    }

    fn scratch_file(&self, stem: &str, extension: &str) -> Result<TempPath, ExportError> {
        let file = tempfile::Builder::new()
            .prefix(&format!("{stem}-"))
            .suffix(&format!(".{extension}"))
            .tempfile_in(&self.scratch_dir)?;
        Ok(file.into_temp_path())
    }
}

/// Deletes a scratch file now so a cleanup failure can be reported.
/// On error paths the `TempPath` drop does the same silently.
fn release(path: TempPath) {
    let shown = path.display().to_string();
    if let Err(e) = path.close() {
        warn!("Error cleaning up {}: {e}", shown);
    }
}

fn sanitize_stem(stem: &str) -> String {
    let cleaned: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "document".to_string()
    } else {
        cleaned
    }
}
