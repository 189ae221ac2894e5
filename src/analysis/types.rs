//! Analysis types

use serde::{Deserialize, Serialize};

use super::error::AnalysisError;

/// Final claim decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Approved,
    Rejected,
    #[serde(rename = "Further Review Required")]
    FurtherReviewRequired,
}

impl Decision {
    /// Wire strings, in declaration order
    pub const ALL: [&'static str; 3] = ["Approved", "Rejected", "Further Review Required"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => Self::ALL[0],
            Self::Rejected => Self::ALL[1],
            Self::FurtherReviewRequired => Self::ALL[2],
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One clause citation supporting the decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JustificationItem {
    /// Clause identifier, e.g. "Clause 3.1"
    pub clause: String,
    /// Verbatim clause text
    pub text: String,
    pub reasoning: String,
}

/// Structured decision returned by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub decision: Decision,
    /// Payout amount as returned by the model; expected to be 0 when rejected
    pub amount: f64,
    /// In the model's relevance order
    pub justification: Vec<JustificationItem>,
}

/// A validated analysis request
///
/// Both fields are checked at construction, so a value of this type is
/// always ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    query: String,
    document: String,
}

impl AnalysisRequest {
    /// Validate and build a request.
    ///
    /// The query is stored trimmed. Whitespace-only values count as empty.
    pub fn new(query: impl AsRef<str>, document: impl Into<String>) -> Result<Self, AnalysisError> {
        let query = query.as_ref().trim();
        if query.is_empty() {
            return Err(AnalysisError::InvalidRequest(
                "Query cannot be empty.".to_string(),
            ));
        }

        let document = document.into();
        if document.trim().is_empty() {
            return Err(AnalysisError::InvalidRequest(
                "Please upload a policy document.".to_string(),
            ));
        }

        Ok(Self {
            query: query.to_string(),
            document,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn document(&self) -> &str {
        &self.document
    }
}

/// System instruction plus per-call user message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredPrompt {
    pub system_instruction: String,
    pub user_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_wire_strings() {
        assert_eq!(
            serde_json::to_string(&Decision::FurtherReviewRequired).unwrap(),
            "\"Further Review Required\""
        );
        let decision: Decision = serde_json::from_str("\"Rejected\"").unwrap();
        assert_eq!(decision, Decision::Rejected);
        assert!(serde_json::from_str::<Decision>("\"FurtherReviewRequired\"").is_err());
    }

    #[test]
    fn test_request_trims_query() {
        let request = AnalysisRequest::new("  knee surgery  ", "Clause 1").unwrap();
        assert_eq!(request.query(), "knee surgery");
        assert_eq!(request.document(), "Clause 1");
    }

    #[test]
    fn test_request_rejects_empty_fields() {
        assert!(matches!(
            AnalysisRequest::new("   ", "Clause 1"),
            Err(AnalysisError::InvalidRequest(_))
        ));
        assert!(matches!(
            AnalysisRequest::new("knee surgery", ""),
            Err(AnalysisError::InvalidRequest(_))
        ));
        assert!(matches!(
            AnalysisRequest::new("knee surgery", "\n\n "),
            Err(AnalysisError::InvalidRequest(_))
        ));
    }
}
