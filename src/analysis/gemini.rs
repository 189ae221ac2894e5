//! Google Gemini provider
//!
//! Calls `models/{model}:generateContent` with a system instruction, one
//! user turn, and a `responseSchema` in the generation config.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::GeminiConfig;

use super::error::GenerationError;
use super::provider::StructuredGenerator;
use super::types::StructuredPrompt;

/// Gemini API message content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Content {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

/// Gemini API request format
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub system_instruction: Content,
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
    pub temperature: f64,
}

/// Gemini API response format
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

/// Gemini `generateContent` client
pub struct GeminiProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
    temperature: f64,
}

impl GeminiProvider {
    /// Build a provider from configuration.
    ///
    /// Idle connections are not pooled: each call opens and closes its own.
    pub fn new(config: &GeminiConfig) -> Result<Self, GenerationError> {
        if config.api_key.trim().is_empty() {
            return Err(GenerationError::MissingCredential);
        }

        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| GenerationError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            temperature: config.temperature,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    /// Wire form of one request
    pub fn request_body(&self, prompt: &StructuredPrompt, schema: &Value) -> GenerateContentRequest {
        GenerateContentRequest {
            system_instruction: Content::text(None, &prompt.system_instruction),
            contents: vec![Content::text(Some("user"), &prompt.user_message)],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema.clone(),
                temperature: self.temperature,
            },
        }
    }
}

#[async_trait]
impl StructuredGenerator for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate_structured(
        &self,
        prompt: &StructuredPrompt,
        schema: &Value,
    ) -> Result<String, GenerationError> {
        let body = self.request_body(prompt, schema);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => GenerationError::Unauthorized {
                    status: status.as_u16(),
                    body,
                },
                code => GenerationError::Status { status: code, body },
            });
        }

        let envelope: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidEnvelope(e.to_string()))?;

        candidate_text(envelope)
    }
}

/// Concatenate the text parts of the first candidate
fn candidate_text(envelope: GenerateContentResponse) -> Result<String, GenerationError> {
    let block_reason = envelope
        .prompt_feedback
        .and_then(|f| f.block_reason);

    let Some(candidate) = envelope.candidates.into_iter().next() else {
        return Err(GenerationError::EmptyResponse(
            block_reason.unwrap_or_else(|| "no candidates".to_string()),
        ));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GenerationError::EmptyResponse(
            candidate
                .finish_reason
                .unwrap_or_else(|| "empty candidate".to_string()),
        ));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{build_prompt, response_schema, AnalysisRequest};
    use axum::{
        body::Bytes,
        http::{HeaderMap, StatusCode, Uri},
        response::IntoResponse,
        Router,
    };
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone)]
    struct Captured {
        path: String,
        api_key: Option<String>,
        body: Value,
    }

    /// Serve one canned reply on a local port
    async fn spawn_stub(status: StatusCode, reply: String) -> (String, Arc<Mutex<Vec<Captured>>>) {
        let captured: Arc<Mutex<Vec<Captured>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = captured.clone();

        let app = Router::new().fallback(move |uri: Uri, headers: HeaderMap, body: Bytes| {
            let sink = sink.clone();
            let reply = reply.clone();
            async move {
                sink.lock().unwrap().push(Captured {
                    path: uri.path().to_string(),
                    api_key: headers
                        .get("x-goog-api-key")
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string),
                    body: serde_json::from_slice(&body).unwrap_or(Value::Null),
                });
                (status, [("content-type", "application/json")], reply).into_response()
            }
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", addr), captured)
    }

    fn config(base_url: &str) -> GeminiConfig {
        GeminiConfig {
            api_key: "test-key".to_string(),
            model: "gemini-test".to_string(),
            base_url: base_url.to_string(),
            temperature: 0.1,
        }
    }

    fn sample_prompt() -> StructuredPrompt {
        let request = AnalysisRequest::new(
            "knee surgery, 3-month-old policy",
            "Clause 4.2: Orthopedic procedures covered after 90-day waiting period",
        )
        .unwrap();
        build_prompt(&request)
    }

    fn envelope(text: &str) -> String {
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }]
        })
        .to_string()
    }

    #[test]
    fn test_missing_credential() {
        let mut cfg = config("http://localhost");
        cfg.api_key = "  ".to_string();
        assert!(matches!(
            GeminiProvider::new(&cfg),
            Err(GenerationError::MissingCredential)
        ));
    }

    #[test]
    fn test_request_body_wire_form() {
        let provider = GeminiProvider::new(&config("http://localhost/")).unwrap();
        let prompt = sample_prompt();
        let body = serde_json::to_value(provider.request_body(&prompt, &response_schema())).unwrap();

        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            json!(prompt.system_instruction)
        );
        assert!(body["systemInstruction"].get("role").is_none());
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            json!(prompt.user_message)
        );
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["generationConfig"]["responseSchema"], response_schema());
        assert_eq!(body["generationConfig"]["temperature"], json!(0.1));
        assert_eq!(
            provider.endpoint(),
            "http://localhost/v1beta/models/gemini-test:generateContent"
        );
    }

    #[tokio::test]
    async fn test_generate_structured_posts_to_model_endpoint() {
        let (base_url, captured) =
            spawn_stub(StatusCode::OK, envelope("{\"decision\":\"Approved\"}")).await;
        let provider = GeminiProvider::new(&config(&base_url)).unwrap();

        let text = provider
            .generate_structured(&sample_prompt(), &response_schema())
            .await
            .unwrap();

        assert_eq!(text, "{\"decision\":\"Approved\"}");
        let requests = captured.lock().unwrap().clone();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].path,
            "/v1beta/models/gemini-test:generateContent"
        );
        assert_eq!(requests[0].api_key.as_deref(), Some("test-key"));
        assert_eq!(
            requests[0].body["generationConfig"]["responseSchema"]["required"],
            json!(["decision", "amount", "justification"])
        );
    }

    #[tokio::test]
    async fn test_parts_are_concatenated() {
        let reply = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"decision\":" }, { "text": "\"Rejected\"}" }] }
            }]
        })
        .to_string();
        let (base_url, _) = spawn_stub(StatusCode::OK, reply).await;
        let provider = GeminiProvider::new(&config(&base_url)).unwrap();

        let text = provider
            .generate_structured(&sample_prompt(), &response_schema())
            .await
            .unwrap();

        assert_eq!(text, "{\"decision\":\"Rejected\"}");
    }

    #[tokio::test]
    async fn test_auth_failure() {
        let (base_url, _) = spawn_stub(
            StatusCode::FORBIDDEN,
            json!({"error": {"message": "API key not valid"}}).to_string(),
        )
        .await;
        let provider = GeminiProvider::new(&config(&base_url)).unwrap();

        let result = provider
            .generate_structured(&sample_prompt(), &response_schema())
            .await;

        match result {
            Err(GenerationError::Unauthorized { status, body }) => {
                assert_eq!(status, 403);
                assert!(body.contains("API key not valid"));
            }
            other => panic!("expected Unauthorized, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let (base_url, _) =
            spawn_stub(StatusCode::SERVICE_UNAVAILABLE, "overloaded".to_string()).await;
        let provider = GeminiProvider::new(&config(&base_url)).unwrap();

        let result = provider
            .generate_structured(&sample_prompt(), &response_schema())
            .await;

        assert!(matches!(
            result,
            Err(GenerationError::Status { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn test_blocked_prompt_is_empty_response() {
        let reply = json!({ "promptFeedback": { "blockReason": "SAFETY" } }).to_string();
        let (base_url, _) = spawn_stub(StatusCode::OK, reply).await;
        let provider = GeminiProvider::new(&config(&base_url)).unwrap();

        let result = provider
            .generate_structured(&sample_prompt(), &response_schema())
            .await;

        match result {
            Err(GenerationError::EmptyResponse(reason)) => assert_eq!(reason, "SAFETY"),
            other => panic!("expected EmptyResponse, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        // Bind then drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let provider = GeminiProvider::new(&config(&format!("http://{}", addr))).unwrap();
        let result = provider
            .generate_structured(&sample_prompt(), &response_schema())
            .await;

        assert!(matches!(result, Err(GenerationError::Transport(_))));
    }
}
