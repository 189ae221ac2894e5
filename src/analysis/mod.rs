//! Structured claim analysis
//!
//! Builds the prompt pair for a claim query and its policy document, submits
//! it to a hosted model with a declared JSON output schema, and validates
//! what comes back.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use claimcheck_server::analysis::{Analyzer, GeminiProvider};
//!
//! let provider = GeminiProvider::new(&config.gemini)?;
//! let analyzer = Analyzer::new(Arc::new(provider));
//!
//! let result = analyzer.analyze_query(query, document_text).await?;
//! println!("{} ({})", result.decision, result.amount);
//! ```

mod analyzer;
mod error;
mod gemini;
mod prompt;
mod provider;
mod schema;
mod types;

pub use analyzer::{parse_analysis, Analyzer};
pub use error::{AnalysisError, GenerationError};
pub use gemini::GeminiProvider;
pub use prompt::{build_prompt, build_user_message, PROMPT_VERSION, SYSTEM_INSTRUCTION};
pub use provider::StructuredGenerator;
pub use schema::response_schema;
pub use types::{AnalysisRequest, AnalysisResult, Decision, JustificationItem, StructuredPrompt};

#[cfg(test)]
pub(crate) use provider::{MockGenerator, MockReply};
