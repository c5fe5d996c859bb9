//! Transport to the multimodal reasoning service
//!
//! `ReasoningBackend` is the seam between the retry/rotation logic and the
//! network. `GeminiBackend` talks to the Gemini `generateContent` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::error::ReasoningError;

/// One prompt plus the image it is about
#[derive(Debug, Clone)]
pub struct ReasoningRequest {
    pub prompt: String,
    pub mime_type: String,
    /// Base64 encoded once per classification and reused across model attempts
    pub image_base64: String,
}

#[async_trait]
pub trait ReasoningBackend: Send + Sync {
    /// Send the request to `model` and return the raw text answer
    async fn generate(
        &self,
        model: &str,
        request: &ReasoningRequest,
    ) -> Result<String, ReasoningError>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    Text { text: &'a str },
    Image { inline_data: InlineData<'a> },
}

#[derive(Debug, Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
}

// Response models - only the fields we need
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Client for the Gemini API
pub struct GeminiBackend {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeminiBackend {
    /// Create a backend with a per-attempt timeout
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, ReasoningError> {
        let client = Client::builder()
            .user_agent("waste-sorter/1.0")
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait]
impl ReasoningBackend for GeminiBackend {
    async fn generate(
        &self,
        model: &str,
        request: &ReasoningRequest,
    ) -> Result<String, ReasoningError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, model);

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    RequestPart::Text {
                        text: &request.prompt,
                    },
                    RequestPart::Image {
                        inline_data: InlineData {
                            mime_type: &request.mime_type,
                            data: &request.image_base64,
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
            },
        };

        tracing::debug!(model = %model, prompt_length = request.prompt.len(), "Sending request to Gemini");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, body));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            ReasoningError::ParseError(format!("Failed to deserialize Gemini response: {}", e))
        })?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ReasoningError::ParseError(
                "Gemini response contained no text".to_string(),
            ));
        }

        Ok(text)
    }
}

/// Map a non-2xx answer to an error, separating quota exhaustion from everything else
fn classify_failure(status: StatusCode, body: String) -> ReasoningError {
    let lowered = body.to_lowercase();
    if status == StatusCode::TOO_MANY_REQUESTS
        || lowered.contains("resource_exhausted")
        || lowered.contains("quota")
    {
        return ReasoningError::QuotaExceeded(format!("{}: {}", status, body));
    }

    ReasoningError::UnexpectedStatus {
        status: status.as_u16(),
        body,
    }
}
