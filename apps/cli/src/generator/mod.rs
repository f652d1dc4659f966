//! Module generation through the Gemini `generateContent` API.

use std::future::Future;
use std::time::Duration;

use microlearn_core::{parse_module, GenerationError, Module};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::GeminiConfig;

/// Key value shipped in sample configuration files.
const PLACEHOLDER_API_KEY: &str = "YOUR_GEMINI_API_KEY_HERE";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

const SYSTEM_PROMPT: &str = r#"You are an expert instructional designer for corporate L&D. Your task is to generate a microlearning module on a given topic. The output must be a single, valid JSON object with no other text before or after it.
The JSON object must have the following structure:
{
  "topic": "The user's requested topic",
  "summary": "A concise, one-paragraph summary (3-5 sentences) of the topic's key principles, suitable for a corporate audience.",
  "flashcards": [
    {"term": "Key Term 1", "definition": "A clear and brief definition."},
    {"term": "Key Term 2", "definition": "A clear and brief definition."}
  ],
  "quiz": [
    {
      "question": "A multiple-choice question to test understanding.",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "answer": "The string of the correct option"
    }
  ]
}
Generate 5-8 flashcards and 4-6 quiz questions. Ensure the content is professional, accurate, and practical for the workplace."#;

/// Source of learning modules.
pub trait ContentGenerator {
    fn generate(&self, topic: &str) -> impl Future<Output = Result<Module, GenerationError>> + Send;
}

// === API Request/Response Types ===

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

impl Content {
    fn text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Gemini-backed content generator.
pub struct GeminiGenerator {
    client: Client,
    config: GeminiConfig,
}

impl GeminiGenerator {
    pub fn new(config: GeminiConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GenerationError::Network(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    fn api_key(&self) -> Result<&str, GenerationError> {
        match self.config.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() && key != PLACEHOLDER_API_KEY => Ok(key),
            _ => Err(GenerationError::MissingApiKey),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

impl ContentGenerator for GeminiGenerator {
    async fn generate(&self, topic: &str) -> Result<Module, GenerationError> {
        let api_key = self.api_key()?;

        tracing::info!(topic, model = %self.config.model, "requesting module");

        let resp = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&build_request(topic))
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let text = response_text(&body)?;
        let module = parse_module(&text)?;
        tracing::debug!(
            topic,
            flashcards = module.flashcards.len(),
            quiz = module.quiz.len(),
            "received module"
        );
        Ok(module)
    }
}

fn build_request(topic: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content::text(format!(
            "Generate a module for the topic: \"{topic}\""
        ))],
        system_instruction: Content::text(SYSTEM_PROMPT),
    }
}

/// Error message from an API error body, or the raw body when it has none.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

/// Text of the first part of the first candidate.
fn response_text(body: &str) -> Result<String, GenerationError> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .map(|part| part.text)
        .ok_or_else(|| GenerationError::MalformedResponse("response has no candidates".to_string()))
}
