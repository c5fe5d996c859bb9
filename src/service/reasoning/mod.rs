//! Secondary reasoning client
//!
//! Asks a multimodal reasoning service to verify or identify the item in an
//! image. Every failure is absorbed here: callers get `None` and fall back to
//! the knowledge base. Quota exhaustion is the only failure that is retried,
//! on the next model of the shared rotation.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::model::{ReasoningConfig, SecondaryAssessment, WasteCategory};

pub mod backend;
pub mod converters;
pub mod error;
pub mod prompts;
pub mod rotation;
pub mod validation;

pub use backend::{GeminiBackend, ReasoningBackend, ReasoningRequest};
pub use error::ReasoningError;
pub use rotation::ModelRotation;

use converters::{convert_identification, convert_verification};
use prompts::{build_identify_prompt, build_verify_prompt};

/// MIME type sent when the upload did not declare one
const DEFAULT_MIME_TYPE: &str = "image/jpeg";

pub struct SecondaryReasoningClient {
    backend: Arc<dyn ReasoningBackend>,
    rotation: Arc<ModelRotation>,
}

impl SecondaryReasoningClient {
    pub fn new(backend: Arc<dyn ReasoningBackend>, rotation: Arc<ModelRotation>) -> Self {
        Self { backend, rotation }
    }

    /// Build a Gemini-backed client, or `None` when no API key is configured
    pub fn from_config(config: &ReasoningConfig) -> Result<Option<Self>, ReasoningError> {
        let Some(api_key) = config.api_key.as_deref() else {
            return Ok(None);
        };

        let backend = GeminiBackend::new(&config.base_url, api_key, config.timeout)?;
        let rotation = ModelRotation::new(config.models.clone())?;

        tracing::info!(
            models = ?config.models,
            timeout_secs = config.timeout.as_secs(),
            "Secondary reasoning client initialized"
        );

        Ok(Some(Self::new(Arc::new(backend), Arc::new(rotation))))
    }

    #[cfg(test)]
    pub fn rotation(&self) -> &ModelRotation {
        &self.rotation
    }

    /// Ask whether the primary classifier's label is right
    pub async fn verify(
        &self,
        image: &[u8],
        mime_type: Option<&str>,
        primary_category: &WasteCategory,
        primary_confidence: u8,
    ) -> Option<SecondaryAssessment> {
        let request = ReasoningRequest {
            prompt: build_verify_prompt(primary_category, primary_confidence),
            mime_type: mime_type.unwrap_or(DEFAULT_MIME_TYPE).to_string(),
            image_base64: BASE64.encode(image),
        };

        self.run("verify", &request, convert_verification)
            .await
            .map(SecondaryAssessment::Verify)
    }

    /// Ask what the item is when the primary classifier is unsure
    pub async fn identify(
        &self,
        image: &[u8],
        mime_type: Option<&str>,
        suggested_category: &WasteCategory,
        primary_confidence: u8,
    ) -> Option<SecondaryAssessment> {
        let request = ReasoningRequest {
            prompt: build_identify_prompt(suggested_category, primary_confidence),
            mime_type: mime_type.unwrap_or(DEFAULT_MIME_TYPE).to_string(),
            image_base64: BASE64.encode(image),
        };

        self.run("identify", &request, convert_identification)
            .await
            .map(SecondaryAssessment::Identify)
    }

    /// Send `request` on the current model, moving along the rotation on quota errors
    async fn run<T>(
        &self,
        mode: &'static str,
        request: &ReasoningRequest,
        convert: fn(&str) -> Result<T, ReasoningError>,
    ) -> Option<T> {
        for attempt in 1..=self.rotation.len() {
            let (index, model) = self.rotation.current();
            let start_time = std::time::Instant::now();

            tracing::debug!(mode, model = %model, attempt, "Calling reasoning service");

            let error = match self.backend.generate(model, request).await {
                Ok(text) => match convert(&text) {
                    Ok(assessment) => {
                        tracing::info!(
                            mode,
                            model = %model,
                            attempt,
                            elapsed_ms = start_time.elapsed().as_millis(),
                            "Reasoning service call completed"
                        );
                        return Some(assessment);
                    }
                    Err(e) => e,
                },
                Err(e) => e,
            };

            let elapsed_ms = start_time.elapsed().as_millis();

            if !error.is_quota_exceeded() {
                tracing::warn!(
                    mode,
                    model = %model,
                    attempt,
                    elapsed_ms,
                    error = %error,
                    "Reasoning service call failed"
                );
                return None;
            }

            tracing::warn!(
                mode,
                model = %model,
                attempt,
                elapsed_ms,
                "Reasoning model quota exhausted"
            );

            if self.rotation.advance_past(index).is_none() {
                tracing::error!(
                    mode,
                    models = self.rotation.len(),
                    "All reasoning models have exhausted their quota"
                );
                return None;
            }
        }

        tracing::error!(mode, "Reasoning attempts exhausted without an answer");
        None
    }
}
