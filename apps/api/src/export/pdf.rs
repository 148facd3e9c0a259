//! PDF export through an external wkhtmltopdf binary.

use std::path::Path;

use tokio::process::Command;
use tracing::{debug, error};

use crate::export::writer::ExportError;

/// Wraps the document text in a minimal HTML page. The text is escaped and
/// shown preformatted, so markdown renders as written.
pub fn html_page(content: &str) -> String {
    let mut body = String::with_capacity(content.len() + 16);
    for c in content.chars() {
        match c {
            '&' => body.push_str("&amp;"),
            '<' => body.push_str("&lt;"),
            '>' => body.push_str("&gt;"),
            '"' => body.push_str("&quot;"),
            '\'' => body.push_str("&#39;"),
            c => body.push(c),
        }
    }
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"></head>\
         <body><pre style=\"white-space: pre-wrap; font-family: sans-serif;\">{body}</pre></body></html>\n"
    )
}

/// Runs `renderer --quiet <html_input> <pdf_output>`.
pub async fn render_pdf(renderer: &Path, html_input: &Path, pdf_output: &Path) -> Result<(), ExportError> {
    debug!("Rendering PDF with {}", renderer.display());

    let output = Command::new(renderer)
        .arg("--quiet")
        .arg(html_input)
        .arg(pdf_output)
        .output()
        .await
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
                ExportError::RendererUnavailable
            }
            _ => ExportError::Io(e),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        error!("PDF renderer exited with {}: {}", output.status, stderr);
        return Err(ExportError::RendererFailed {
            code: output.status.code(),
            stderr,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_page_escapes_markup() {
        let html = html_page("<script>alert('x')</script> & more");
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; more"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_html_page_declares_utf8() {
        assert!(html_page("Résumé 简历").contains(r#"<meta charset="utf-8">"#));
    }
}
