//! Axum route handlers for downloading generated documents.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::writer::ExportWriter;
use crate::models::document::{DocumentKind, GeneratedDocument};
use crate::models::language::ExportFormat;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    /// Overrides the session's export format.
    pub format: Option<ExportFormat>,
}

/// A download offered next to a generated document. Export failures are
/// reported here instead of failing the generation that preceded them.
#[derive(Debug, Serialize)]
pub struct DownloadOffer {
    pub format: ExportFormat,
    pub filename: Option<String>,
    pub link_html: Option<String>,
    pub error: Option<String>,
}

pub async fn offer_download(
    exporter: &ExportWriter,
    document: &GeneratedDocument,
    format: ExportFormat,
) -> DownloadOffer {
    match exporter
        .export(&document.content, format, document.kind.file_stem())
        .await
    {
        Ok(file) => DownloadOffer {
            format,
            link_html: Some(file.download_link()),
            filename: Some(file.filename),
            error: None,
        },
        Err(e) => {
            warn!("Error generating {}: {e}", format.extension());
            DownloadOffer {
                format,
                filename: None,
                link_html: None,
                error: Some(format!("Error generating {}: {e}", format.extension())),
            }
        }
    }
}

async fn load_document(
    state: &AppState,
    id: Uuid,
    kind: DocumentKind,
    query: &ExportQuery,
) -> Result<(GeneratedDocument, ExportFormat), AppError> {
    let session = state.sessions.lock(id).await?;
    let document = session
        .document(kind)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("No {kind:?} has been generated yet")))?;
    let format = query.format.unwrap_or(session.settings.export_format);
    Ok((document, format))
}

/// GET /api/v1/sessions/:id/documents/:kind/download
///
/// Streams the file itself as an attachment.
pub async fn handle_download(
    State(state): State<AppState>,
    Path((id, kind)): Path<(Uuid, DocumentKind)>,
    Query(query): Query<ExportQuery>,
) -> Result<Response, AppError> {
    let (document, format) = load_document(&state, id, kind, &query).await?;
    let file = state
        .exporter
        .export(&document.content, format, kind.file_stem())
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, format.mime_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.filename),
            ),
        ],
        file.bytes,
    )
        .into_response())
}

/// GET /api/v1/sessions/:id/documents/:kind/link
///
/// Returns the base64 `data:` hyperlink for the document.
pub async fn handle_download_link(
    State(state): State<AppState>,
    Path((id, kind)): Path<(Uuid, DocumentKind)>,
    Query(query): Query<ExportQuery>,
) -> Result<Json<DownloadOffer>, AppError> {
    let (document, format) = load_document(&state, id, kind, &query).await?;
    let file = state
        .exporter
        .export(&document.content, format, kind.file_stem())
        .await?;

    Ok(Json(DownloadOffer {
        format,
        link_html: Some(file.download_link()),
        filename: Some(file.filename),
        error: None,
    }))
}
