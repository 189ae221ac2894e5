//! Analysis routes
//!
//! Endpoints:
//! - POST /api/v1/analyze - Analyze a claim query against extracted text

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use crate::analysis::AnalysisResult;
use crate::error::Result;
use crate::state::AppState;

/// Create the analyze router
pub fn router() -> Router<AppState> {
    Router::new().route("/analyze", post(analyze))
}

/// Analysis request body
///
/// Missing fields deserialize as empty and are rejected by validation.
#[derive(Debug, Deserialize)]
pub struct AnalyzePayload {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub document: String,
}

/// POST /api/v1/analyze
async fn analyze(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzePayload>,
) -> Result<Json<AnalysisResult>> {
    let result = state
        .analyzer()
        .analyze_query(&payload.query, &payload.document)
        .await?;
    Ok(Json(result))
}
