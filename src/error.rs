//! Error types for the ClaimCheck server

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::document::ExtractError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Upload error: {0}")]
    Upload(#[from] MultipartError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::Upload(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "payload_too_large",
                "The uploaded file exceeds the size limit.".to_string(),
            ),
            AppError::Upload(e) => (StatusCode::BAD_REQUEST, "bad_request", e.body_text()),
            AppError::Extract(ExtractError::UnsupportedMediaKind(mime)) => {
                tracing::debug!("Rejected upload with media type {:?}", mime);
                (
                    StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    "unsupported_media_type",
                    "Please upload a valid .txt or .pdf file.".to_string(),
                )
            }
            AppError::Extract(ExtractError::UnreadableDocument(cause)) => {
                tracing::warn!("Unreadable document: {}", cause);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "unreadable_document",
                    "Failed to process file. It might be corrupted or password-protected."
                        .to_string(),
                )
            }
            AppError::Analysis(AnalysisError::InvalidRequest(msg)) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            AppError::Analysis(AnalysisError::ServiceCommunication(e)) => {
                tracing::error!("Analysis service error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "service_unavailable",
                    "An error occurred while communicating with the AI analysis service."
                        .to_string(),
                )
            }
            AppError::Analysis(AnalysisError::MalformedResponse(reason)) => {
                tracing::error!("Malformed analysis response: {}", reason);
                (
                    StatusCode::BAD_GATEWAY,
                    "malformed_response",
                    "Failed to parse the analysis from the AI. The AI may have returned an invalid format."
                        .to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            details: if cfg!(debug_assertions) {
                Some(self.to_string())
            } else {
                None
            },
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::GenerationError;

    #[test]
    fn test_status_codes() {
        let cases = vec![
            (AppError::BadRequest("no file".into()), StatusCode::BAD_REQUEST),
            (
                ExtractError::UnsupportedMediaKind("image/png".into()).into(),
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ),
            (
                ExtractError::UnreadableDocument("xref".into()).into(),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AnalysisError::InvalidRequest("Query cannot be empty.".into()).into(),
                StatusCode::BAD_REQUEST,
            ),
            (
                AnalysisError::ServiceCommunication(GenerationError::Transport("timeout".into()))
                    .into(),
                StatusCode::BAD_GATEWAY,
            ),
            (
                AnalysisError::MalformedResponse("not json".into()).into(),
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
