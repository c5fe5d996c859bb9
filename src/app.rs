//! Application state and service initialization
//!
//! This module centralizes all service initialization and dependency injection,
//! making it easier to manage the application lifecycle and test services.

use std::sync::Arc;

use url::Url;

use crate::model::Config;
use crate::service::{ClassificationService, HttpPrimaryClassifier, SecondaryReasoningClient};

/// Application state containing all services and shared resources
pub struct AppState {
    /// Classification pipeline, shared by every worker
    pub classification_service: Arc<ClassificationService>,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// This performs:
    /// 1. Endpoint URL validation
    /// 2. Primary classifier client initialization
    /// 3. Reasoning client initialization (skipped when GEMINI_API_KEY is unset)
    pub fn new(config: &Config) -> Result<Self, AppError> {
        Url::parse(&config.primary.base_url)
            .map_err(|_| AppError::InvalidConfig("MODEL_SERVICE_URL is not a valid URL"))?;

        let primary = HttpPrimaryClassifier::new(&config.primary)
            .map_err(|e| AppError::ClientInit(e.to_string()))?;

        tracing::info!(
            url = %config.primary.base_url,
            timeout_secs = config.primary.timeout.as_secs(),
            "Primary classifier client initialized"
        );

        let reasoning = if config.reasoning.api_key.is_some() {
            Url::parse(&config.reasoning.base_url)
                .map_err(|_| AppError::InvalidConfig("GEMINI_BASE_URL is not a valid URL"))?;

            SecondaryReasoningClient::from_config(&config.reasoning)
                .map_err(|e| AppError::ClientInit(e.to_string()))?
        } else {
            tracing::warn!("GEMINI_API_KEY not set, reasoning service disabled");
            None
        };

        Ok(Self {
            classification_service: Arc::new(ClassificationService::new(
                Arc::new(primary),
                reasoning,
            )),
        })
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// An outbound client could not be built
    #[error("Client initialization failed: {0}")]
    ClientInit(String),
}
