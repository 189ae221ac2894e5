//! Document upload routes
//!
//! Endpoints:
//! - POST /api/v1/documents/extract - Upload a .txt or .pdf and get its text

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;

use crate::document::{ExtractError, MediaKind, SourceDocument};
use crate::error::{AppError, Result};
use crate::state::AppState;

const FILE_FIELD: &str = "file";
const OCTET_STREAM: &str = "application/octet-stream";

/// Create the documents router
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/documents/extract", post(extract_document))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

/// Extracted text response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    pub file_name: String,
    pub media_type: MediaKind,
    /// Character count of `text`
    pub characters: usize,
    pub text: String,
}

/// POST /api/v1/documents/extract
///
/// Multipart form with a single `file` part. Unsupported types are
/// rejected before the body is read.
async fn extract_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractResponse>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let declared = declared_media_type(field.content_type(), &file_name);
        let Some(kind) = MediaKind::from_mime(&declared) else {
            return Err(ExtractError::UnsupportedMediaKind(declared).into());
        };

        let bytes = field.bytes().await?;

        tracing::info!("Received {} ({}, {} bytes)", file_name, kind.mime(), bytes.len());

        let text = state
            .extractor()
            .extract(SourceDocument::new(bytes, declared))
            .await?;

        return Ok(Json(ExtractResponse {
            file_name,
            media_type: kind,
            characters: text.char_count(),
            text: text.into_string(),
        }));
    }

    Err(AppError::BadRequest(format!(
        "Missing `{}` field in upload",
        FILE_FIELD
    )))
}

/// Declared type of an upload part
///
/// Uses the part's Content-Type; falls back to a guess from the file name
/// when the client sent none or a generic binary type.
fn declared_media_type(content_type: Option<&str>, file_name: &str) -> String {
    match content_type {
        Some(ct) if !ct.trim().is_empty() && !ct.eq_ignore_ascii_case(OCTET_STREAM) => {
            ct.to_string()
        }
        _ => mime_guess::from_path(file_name)
            .first_raw()
            .unwrap_or(OCTET_STREAM)
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_media_type_prefers_content_type() {
        assert_eq!(
            declared_media_type(Some("application/pdf"), "policy.txt"),
            "application/pdf"
        );
    }

    #[test]
    fn test_declared_media_type_guesses_from_name() {
        assert_eq!(declared_media_type(None, "policy.pdf"), "application/pdf");
        assert_eq!(
            declared_media_type(Some("application/octet-stream"), "terms.txt"),
            "text/plain"
        );
        assert_eq!(declared_media_type(None, "no-extension"), OCTET_STREAM);
    }
}
