//! Google Gemini `generateContent` client.
//!
//! Sends one user turn with JSON output constrained by `responseSchema` and
//! returns the concatenated text of the first candidate.

use crate::domain::model::GenerationRequest;
use crate::domain::ports::GenerationBackend;
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiClient {
    http_client: Client,
    endpoint: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GeminiClient {
    /// The API key is passed in explicitly; nothing is read from the process
    /// environment here.
    pub fn new(endpoint: &str, api_key: impl Into<String>) -> Result<Self> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http_client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    fn url_for(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.endpoint, model)
    }

    fn request_body(request: &GenerationRequest) -> serde_json::Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.instruction }],
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": request.schema.to_gemini_schema(),
            },
        })
    }

    fn extract_text(response: GenerateContentResponse) -> Result<String> {
        let block_reason = response.prompt_feedback.and_then(|f| f.block_reason);

        let (parts, finish_reason) = match response.candidates.into_iter().next() {
            Some(candidate) => (
                candidate.content.map(|c| c.parts).unwrap_or_default(),
                candidate.finish_reason,
            ),
            None => (Vec::new(), None),
        };

        let text: String = parts.into_iter().filter_map(|p| p.text).collect();
        if text.is_empty() {
            // 沒有 promptFeedback 時，以候選結果的 finishReason 說明原因
            return Err(GatewayError::EmptyCandidates {
                reason: block_reason.or(finish_reason),
            });
        }
        Ok(text)
    }
}

#[async_trait]
impl GenerationBackend for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let url = self.url_for(&request.model);
        tracing::debug!("Making generateContent request to: {}", url);

        let response = self
            .http_client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&Self::request_body(request))
            .send()
            .await?;

        tracing::debug!("Model API response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::UpstreamStatus { status, body });
        }

        let payload: GenerateContentResponse = response.json().await?;
        Self::extract_text(payload)
    }
}
