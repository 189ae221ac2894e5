//! Declared output schema
//!
//! Expressed in the Gemini `responseSchema` dialect (OpenAPI subset with
//! upper-case type names). The service enforces it during generation; the
//! analyzer itself only checks `decision` and `justification`.

use serde_json::{json, Value};

use super::types::Decision;

/// Schema for an `AnalysisResult`
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "decision": {
                "type": "STRING",
                "description": "The final decision: 'Approved', 'Rejected', or 'Further Review Required'.",
                "enum": Decision::ALL
            },
            "amount": {
                "type": "NUMBER",
                "description": "The approved payout amount in INR. Must be 0 if the claim is rejected."
            },
            "justification": {
                "type": "ARRAY",
                "description": "Reasons for the decision, each mapping back to a specific clause of the document, most relevant first.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "clause": {
                            "type": "STRING",
                            "description": "The identifier of the clause, e.g. 'Clause 3.1'."
                        },
                        "text": {
                            "type": "STRING",
                            "description": "The full text of the relevant clause, quoted from the document."
                        },
                        "reasoning": {
                            "type": "STRING",
                            "description": "How this clause applies to the claim query and supports the decision."
                        }
                    },
                    "required": ["clause", "text", "reasoning"]
                }
            }
        },
        "required": ["decision", "amount", "justification"]
    })
}
