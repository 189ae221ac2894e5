//! Analysis error types

use thiserror::Error;

/// Analysis failure, classified by what the caller can do about it
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Empty query or document; caller-correctable
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The outbound call could not be completed
    #[error("Service communication error: {0}")]
    ServiceCommunication(#[source] GenerationError),

    /// The service answered, but not with a valid analysis
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl AnalysisError {
    /// Stable short name, used for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "invalid_request",
            Self::ServiceCommunication(_) => "service_communication",
            Self::MalformedResponse(_) => "malformed_response",
        }
    }
}

impl From<GenerationError> for AnalysisError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::EmptyResponse(reason) => AnalysisError::MalformedResponse(reason),
            other => AnalysisError::ServiceCommunication(other),
        }
    }
}

/// Model provider error types
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("API credential not configured")]
    MissingCredential,

    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("Credential rejected ({status}): {body}")]
    Unauthorized { status: u16, body: String },

    #[error("API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse service envelope: {0}")]
    InvalidEnvelope(String),

    #[error("Service returned no text: {0}")]
    EmptyResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_error_classification() {
        let err: AnalysisError = GenerationError::Transport("connection refused".into()).into();
        assert!(matches!(err, AnalysisError::ServiceCommunication(_)));

        let err: AnalysisError = GenerationError::Unauthorized {
            status: 403,
            body: "API key not valid".into(),
        }
        .into();
        assert_eq!(err.kind(), "service_communication");

        let err: AnalysisError = GenerationError::EmptyResponse("SAFETY".into()).into();
        assert!(matches!(err, AnalysisError::MalformedResponse(_)));
    }
}
