//! Model providers
//!
//! Defines the provider trait the analyzer talks to. The concrete Gemini
//! implementation lives in `gemini.rs`.

use async_trait::async_trait;
use serde_json::Value;

use super::error::GenerationError;
use super::types::StructuredPrompt;

/// Schema-constrained text generation
#[async_trait]
pub trait StructuredGenerator: Send + Sync {
    /// Provider name, for logging
    fn name(&self) -> &str;

    /// Submit one prompt with a declared output schema and return the raw
    /// generated text
    async fn generate_structured(
        &self,
        prompt: &StructuredPrompt,
        schema: &Value,
    ) -> Result<String, GenerationError>;
}

/// Canned reply for [`MockGenerator`]
#[cfg(test)]
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Transport(String),
    Empty,
}

/// Mock provider for testing
#[cfg(test)]
pub struct MockGenerator {
    pub reply: MockReply,
    pub calls: std::sync::Mutex<Vec<(StructuredPrompt, Value)>>,
}

#[cfg(test)]
impl MockGenerator {
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_reply(MockReply::Text(text.into()))
    }

    pub fn with_reply(reply: MockReply) -> Self {
        Self {
            reply,
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<StructuredPrompt> {
        self.calls.lock().unwrap().last().map(|(p, _)| p.clone())
    }
}

#[cfg(test)]
#[async_trait]
impl StructuredGenerator for MockGenerator {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate_structured(
        &self,
        prompt: &StructuredPrompt,
        schema: &Value,
    ) -> Result<String, GenerationError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.clone(), schema.clone()));

        match &self.reply {
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::Transport(msg) => Err(GenerationError::Transport(msg.clone())),
            MockReply::Empty => Err(GenerationError::EmptyResponse("no candidates".to_string())),
        }
    }
}
