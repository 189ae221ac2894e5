//! Prompt construction

use super::types::{AnalysisRequest, StructuredPrompt};

/// Bumped whenever the system instruction changes meaning
pub const PROMPT_VERSION: &str = "claim-adjudication/v1";

/// Fixed system instruction for claim adjudication
pub const SYSTEM_INSTRUCTION: &str = "\
You are a meticulous insurance claim processing assistant. Your task is to analyze a claim query against the insurance policy document you are given.

Follow these steps precisely:
1. Analyze the claim query and extract its key attributes: age, medical procedure, location and policy duration.
2. Scan the entire policy document and find every clause relevant to those attributes.
3. Evaluate the claim against each relevant clause and determine whether its conditions are met.
4. Decide: 'Approved', 'Rejected', or 'Further Review Required' when the document does not settle the claim.
5. If approved, calculate the payout amount from the rules in the policy document (coverage limits, sub-limits, co-payments). If rejected, the amount must be 0.
6. Justify the decision, citing each clause identifier, its verbatim text, and how it applies to the query.

Format your entire output as a single valid JSON object that adheres to the provided schema. Do not output any text before or after the JSON object.";

/// Build the prompt pair for one request
pub fn build_prompt(request: &AnalysisRequest) -> StructuredPrompt {
    StructuredPrompt {
        system_instruction: SYSTEM_INSTRUCTION.to_string(),
        user_message: build_user_message(request.query(), request.document()),
    }
}

/// Embed the literal query and document between delimiters
pub fn build_user_message(query: &str, document: &str) -> String {
    format!(
        "Analyze the following claim query against the provided policy document.\n\n\
         Claim Query:\n\"{}\"\n\n\
         Policy Document:\n---\n{}\n---\n",
        query, document
    )
}
