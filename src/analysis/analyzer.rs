//! Structured query analyzer
//!
//! One call, one outbound request: Idle -> Requesting -> Succeeded or
//! Failed(kind). No retries, no repair of bad output.

use std::sync::Arc;

use serde_json::Value;
use tracing::Instrument;

use super::error::AnalysisError;
use super::prompt::{build_prompt, PROMPT_VERSION};
use super::provider::StructuredGenerator;
use super::schema::response_schema;
use super::types::{AnalysisRequest, AnalysisResult, Decision};

/// Runs claim analyses against a structured generator
#[derive(Clone)]
pub struct Analyzer {
    generator: Arc<dyn StructuredGenerator>,
    schema: Arc<Value>,
}

impl Analyzer {
    pub fn new(generator: Arc<dyn StructuredGenerator>) -> Self {
        Self {
            generator,
            schema: Arc::new(response_schema()),
        }
    }

    /// Validate raw inputs, then analyze.
    ///
    /// Fails with `InvalidRequest` before any outbound call when either
    /// input is empty.
    pub async fn analyze_query(
        &self,
        query: &str,
        document: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        let request = AnalysisRequest::new(query, document)?;
        self.analyze(&request).await
    }

    /// Analyze a validated request with exactly one outbound call
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let span = tracing::info_span!(
            "analysis",
            request_id = %uuid::Uuid::new_v4(),
            provider = self.generator.name(),
            prompt_version = PROMPT_VERSION,
        );

        async move {
            let prompt = build_prompt(request);
            tracing::debug!(
                "Requesting analysis (query {} chars, document {} chars)",
                request.query().chars().count(),
                request.document().chars().count()
            );

            let outcome = match self.generator.generate_structured(&prompt, &self.schema).await {
                Ok(text) => parse_analysis(&text),
                Err(e) => Err(e.into()),
            };

            match &outcome {
                Ok(result) => tracing::info!(
                    "Analysis succeeded: decision={}, {} justification items",
                    result.decision,
                    result.justification.len()
                ),
                Err(e) => tracing::warn!("Analysis failed ({}): {}", e.kind(), e),
            }
            outcome
        }
        .instrument(span)
        .await
    }
}

/// Parse and minimally validate the generated text.
///
/// Requires a non-empty string `decision` and an array `justification`;
/// everything else must decode into `AnalysisResult`. `amount` is passed
/// through untouched.
pub fn parse_analysis(text: &str) -> Result<AnalysisResult, AnalysisError> {
    let value: Value = serde_json::from_str(text.trim()).map_err(|e| {
        AnalysisError::MalformedResponse(format!("response is not valid JSON: {}", e))
    })?;

    let has_decision = value
        .get("decision")
        .and_then(Value::as_str)
        .is_some_and(|d| !d.is_empty());
    if !has_decision {
        return Err(AnalysisError::MalformedResponse(
            "missing required field `decision`".to_string(),
        ));
    }

    if !value.get("justification").is_some_and(Value::is_array) {
        return Err(AnalysisError::MalformedResponse(
            "missing required field `justification`".to_string(),
        ));
    }

    let result: AnalysisResult = serde_json::from_value(value)
        .map_err(|e| AnalysisError::MalformedResponse(e.to_string()))?;

    if result.decision == Decision::Rejected && result.amount != 0.0 {
        tracing::warn!(
            "Model rejected the claim but returned a non-zero amount ({}); passing it through",
            result.amount
        );
    }

    Ok(result)
}
