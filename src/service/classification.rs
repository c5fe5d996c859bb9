//! Classification pipeline
//!
//! primary classifier -> confidence router -> reasoning service (optional)
//! -> conflict resolver -> eco score. Only a failing primary classifier makes
//! a request fail.

use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::model::{ClassificationMode, ClassificationOutcome, SecondaryAssessment};
use crate::service::primary::{PrimaryClassifier, PrimaryClassifierError};
use crate::service::reasoning::SecondaryReasoningClient;
use crate::service::{eco_score, resolver, router};

#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    /// Any primary classifier failure, including a non-2xx answer
    #[error("Primary classifier unavailable: {0}")]
    PrimaryUnavailable(String),

    /// The upload was rejected before reaching the primary classifier
    #[error("Invalid image: {0}")]
    InvalidImage(String),
}

impl From<PrimaryClassifierError> for ClassificationError {
    fn from(err: PrimaryClassifierError) -> Self {
        Self::PrimaryUnavailable(err.to_string())
    }
}

/// Runs one image through the whole decision pipeline
pub struct ClassificationService {
    primary: Arc<dyn PrimaryClassifier>,
    reasoning: Option<SecondaryReasoningClient>,
}

impl ClassificationService {
    /// `reasoning = None` runs the pipeline with the reasoning service disabled
    pub fn new(
        primary: Arc<dyn PrimaryClassifier>,
        reasoning: Option<SecondaryReasoningClient>,
    ) -> Self {
        if reasoning.is_none() {
            tracing::warn!("Reasoning service disabled, results will use fallback guidance only");
        }

        Self { primary, reasoning }
    }

    pub fn reasoning_enabled(&self) -> bool {
        self.reasoning.is_some()
    }

    pub async fn primary_health(&self) -> Result<(), PrimaryClassifierError> {
        self.primary.health().await
    }

    pub async fn classify(
        &self,
        image: &[u8],
        filename: &str,
        mime_type: Option<&str>,
    ) -> Result<ClassificationOutcome, ClassificationError> {
        if image.is_empty() {
            return Err(ClassificationError::InvalidImage("Image is empty".to_string()));
        }

        let digest = image_digest(image);
        let start_time = std::time::Instant::now();

        tracing::debug!(image = %digest, image_bytes = image.len(), "Classifying image");

        let primary = match self.primary.classify(image, filename, mime_type).await {
            Ok(prediction) => prediction,
            Err(e) => {
                tracing::error!(
                    image = %digest,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    error = %e,
                    "Primary classifier call failed"
                );
                return Err(e.into());
            }
        };

        tracing::info!(
            image = %digest,
            category = %primary.category,
            confidence = primary.confidence,
            elapsed_ms = start_time.elapsed().as_millis(),
            "Primary classifier call completed"
        );

        let mode = router::route(primary.confidence);

        let result = match &self.reasoning {
            None => resolver::primary_only(&primary),
            Some(reasoning) => {
                let secondary: Option<SecondaryAssessment> = match mode {
                    ClassificationMode::Verify => {
                        reasoning
                            .verify(image, mime_type, &primary.category, primary.confidence)
                            .await
                    }
                    ClassificationMode::Identify => {
                        reasoning
                            .identify(image, mime_type, &primary.category, primary.confidence)
                            .await
                    }
                };
                resolver::resolve(&primary, secondary, mode)
            }
        };

        let eco_score = eco_score::score_result(&result);

        tracing::info!(
            image = %digest,
            category = %result.category,
            source = ?result.source,
            had_conflict = result.had_conflict,
            eco_score,
            elapsed_ms = start_time.elapsed().as_millis(),
            "Image classified"
        );

        Ok(ClassificationOutcome {
            result,
            eco_score,
            mode,
            classified_at: chrono::Utc::now(),
        })
    }
}

/// Short hex digest that identifies an image in logs
fn image_digest(image: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(image);
    let hex = format!("{:x}", hasher.finalize());
    hex[..12].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CoreCategory, ResultSource, WasteCategory, join_guidance};
    use crate::service::knowledge_base;
    use crate::service::reasoning::ModelRotation;
    use crate::service::testing::{
        FixedPrimary, ScriptedBackend, agree_answer, ewaste_identification_answer, quota_error,
        textile_correction_answer,
    };

    const IMAGE: &[u8] = b"\x89PNG fake image bytes";

    fn service(
        primary: FixedPrimary,
        answers: Vec<Result<String, crate::service::reasoning::ReasoningError>>,
    ) -> (ClassificationService, Arc<ScriptedBackend>, Arc<ModelRotation>) {
        let backend = Arc::new(ScriptedBackend::new(answers));
        let rotation = Arc::new(
            ModelRotation::new(vec![
                "model-a".to_string(),
                "model-b".to_string(),
                "model-c".to_string(),
            ])
            .unwrap(),
        );
        let reasoning = SecondaryReasoningClient::new(backend.clone(), rotation.clone());
        (
            ClassificationService::new(Arc::new(primary), Some(reasoning)),
            backend,
            rotation,
        )
    }

    #[tokio::test]
    async fn test_confident_primary_confirmed() {
        let (service, _, _) = service(
            FixedPrimary::predicting("plastic", 92.0),
            vec![Ok(agree_answer())],
        );

        let outcome = service.classify(IMAGE, "bottle.png", Some("image/png")).await.unwrap();

        assert_eq!(outcome.mode, ClassificationMode::Verify);
        assert_eq!(outcome.result.category.as_str(), "plastic");
        assert_eq!(outcome.result.source, ResultSource::PrimaryPlusSecondaryAgreed);
        assert!(!outcome.result.had_conflict);
        assert_eq!(outcome.eco_score, 7);
    }

    #[tokio::test]
    async fn test_confident_primary_corrected() {
        let (service, _, _) = service(
            FixedPrimary::predicting("organic", 95.0),
            vec![Ok(textile_correction_answer())],
        );

        let outcome = service.classify(IMAGE, "shirt.jpg", None).await.unwrap();
        let result = outcome.result;

        assert_eq!(result.category.as_str(), "textile");
        assert_eq!(result.source, ResultSource::SecondaryCorrected);
        assert!(result.had_conflict);
        let details = result.conflict_details.unwrap();
        assert_eq!(details.model_said.as_str(), "organic");
        assert_eq!(details.model_confidence, 95);
        assert_eq!(details.secondary_said.as_str(), "textile");
    }

    #[tokio::test]
    async fn test_unsure_primary_identified_as_extended_category() {
        let (service, backend, _) = service(
            FixedPrimary::predicting("metal", 30.0),
            vec![Ok(ewaste_identification_answer())],
        );

        let outcome = service.classify(IMAGE, "phone.jpg", None).await.unwrap();

        assert_eq!(outcome.mode, ClassificationMode::Identify);
        assert_eq!(outcome.result.category.as_str(), "e-waste");
        assert!(outcome.result.is_extended_category);
        assert_eq!(outcome.result.source, ResultSource::SecondaryLowConfidence);
        assert_eq!(outcome.result.confidence, 30);
        assert!(backend.last_request().unwrap().prompt.contains("LOW confidence (30%)"));
    }

    #[tokio::test]
    async fn test_quota_exhaustion_falls_back_to_knowledge_base() {
        let (service, backend, rotation) = service(
            FixedPrimary::predicting("glass", 70.0),
            vec![Err(quota_error()), Err(quota_error()), Err(quota_error())],
        );

        let outcome = service.classify(IMAGE, "jar.jpg", None).await.unwrap();
        let glass = WasteCategory::Core(CoreCategory::Glass);

        assert_eq!(outcome.result.category, glass);
        assert_eq!(outcome.result.source, ResultSource::FallbackOnly);
        assert_eq!(
            outcome.result.disposal_guidance,
            join_guidance(&knowledge_base::lookup(&glass).instructions.steps)
        );
        assert_eq!(outcome.eco_score, 7);
        assert_eq!(backend.calls().len(), 3);
        assert_eq!(rotation.current().0, 2);
    }

    #[tokio::test]
    async fn test_disabled_reasoning_uses_primary_only() {
        let service =
            ClassificationService::new(Arc::new(FixedPrimary::predicting("paper", 64.0)), None);

        let outcome = service.classify(IMAGE, "box.jpg", None).await.unwrap();

        assert!(!service.reasoning_enabled());
        assert_eq!(outcome.result.source, ResultSource::PrimaryOnly);
        assert_eq!(outcome.result.category.as_str(), "paper");
        assert_eq!(outcome.eco_score, 6);
    }

    #[tokio::test]
    async fn test_primary_failure_is_the_only_hard_error() {
        let (service, backend, _) = service(FixedPrimary::failing(503), vec![]);

        let result = service.classify(IMAGE, "x.jpg", None).await;

        assert!(matches!(result, Err(ClassificationError::PrimaryUnavailable(_))));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_primary_client_error_is_primary_unavailable() {
        let (service, backend, _) = service(FixedPrimary::failing(422), vec![]);

        let result = service.classify(IMAGE, "x.gif", Some("image/gif")).await;

        assert!(matches!(result, Err(ClassificationError::PrimaryUnavailable(_))));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_non_waste_subject_earns_nothing() {
        let (service, _, _) = service(
            FixedPrimary::predicting("glass", 40.0),
            vec![Ok(r#"{"item_identified":"person","is_waste":false,"message":"This is a person, not waste."}"#.to_string())],
        );

        let outcome = service.classify(IMAGE, "selfie.jpg", None).await.unwrap();

        assert_eq!(outcome.mode, ClassificationMode::Identify);
        assert_eq!(outcome.result.source, ResultSource::SecondaryLowConfidence);
        assert!(!outcome.result.is_waste);
        assert_eq!(
            outcome.result.message.as_deref(),
            Some("This is a person, not waste.")
        );
        assert_eq!(outcome.eco_score, 0);
    }

    #[tokio::test]
    async fn test_empty_image_is_invalid() {
        let (service, _, _) = service(FixedPrimary::predicting("plastic", 90.0), vec![]);
        let result = service.classify(b"", "x.jpg", None).await;
        assert!(matches!(result, Err(ClassificationError::InvalidImage(_))));
    }

    #[test]
    fn test_image_digest_is_short_and_stable() {
        let digest = image_digest(b"abc");
        assert_eq!(digest, "ba7816bf8f01");
        assert_eq!(digest, image_digest(b"abc"));
    }
}
