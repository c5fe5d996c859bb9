//! Primary classifier client
//!
//! Talks to the image-classification model service. The service only knows
//! the six core categories; anything else it says is still passed through.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::model::{PrimaryConfig, PrimaryPrediction, WasteCategory};

#[derive(Debug, thiserror::Error)]
pub enum PrimaryClassifierError {
    #[error("Model service unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    /// The service refused the upload itself (4xx)
    #[error("Model service rejected the image ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("Unexpected status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Invalid model service response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait PrimaryClassifier: Send + Sync {
    /// Classify one image into a category with a 0-100 confidence
    async fn classify(
        &self,
        image: &[u8],
        filename: &str,
        mime_type: Option<&str>,
    ) -> Result<PrimaryPrediction, PrimaryClassifierError>;

    /// Check that the model service is up
    async fn health(&self) -> Result<(), PrimaryClassifierError>;
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    category: String,
    confidence: f64,
}

/// HTTP client for the model service's `/predict` endpoint
pub struct HttpPrimaryClassifier {
    client: Client,
    base_url: String,
}

impl HttpPrimaryClassifier {
    pub fn new(config: &PrimaryConfig) -> Result<Self, PrimaryClassifierError> {
        let client = Client::builder()
            .user_agent("waste-sorter/1.0")
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl PrimaryClassifier for HttpPrimaryClassifier {
    async fn classify(
        &self,
        image: &[u8],
        filename: &str,
        mime_type: Option<&str>,
    ) -> Result<PrimaryPrediction, PrimaryClassifierError> {
        let url = format!("{}/predict", self.base_url);

        let mut part = Part::bytes(image.to_vec()).file_name(filename.to_string());
        if let Some(mime_type) = mime_type {
            part = part.mime_str(mime_type)?;
        }
        let form = Form::new().part("file", part);

        tracing::debug!(url = %url, image_bytes = image.len(), "Sending image to model service");

        let response = self.client.post(&url).multipart(form).send().await?;

        let status = response.status();
        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(PrimaryClassifierError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PrimaryClassifierError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        let predicted: PredictResponse = response.json().await.map_err(|e| {
            PrimaryClassifierError::InvalidResponse(format!(
                "Failed to deserialize prediction: {}",
                e
            ))
        })?;

        into_prediction(predicted)
    }

    async fn health(&self) -> Result<(), PrimaryClassifierError> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PrimaryClassifierError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

fn into_prediction(predicted: PredictResponse) -> Result<PrimaryPrediction, PrimaryClassifierError> {
    let category = WasteCategory::parse(&predicted.category).ok_or_else(|| {
        PrimaryClassifierError::InvalidResponse("Prediction has an empty category".to_string())
    })?;

    Ok(PrimaryPrediction::from_raw(category, predicted.confidence))
}
