//! Classification request and result models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::category::WasteCategory;

/// Output of the primary classifier, normalized to an integer percentage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryPrediction {
    pub category: WasteCategory,
    pub confidence: u8,
}

impl PrimaryPrediction {
    pub fn new(category: WasteCategory, confidence: u8) -> Self {
        Self {
            category,
            confidence: confidence.min(100),
        }
    }

    /// Build a prediction from the raw float confidence the classifier reports.
    ///
    /// NaN and negative values collapse to 0, values above 100 to 100.
    pub fn from_raw(category: WasteCategory, raw_confidence: f64) -> Self {
        let confidence = if raw_confidence.is_nan() {
            0
        } else {
            raw_confidence.round().clamp(0.0, 100.0) as u8
        };
        Self::new(category, confidence)
    }
}

/// How the reasoning service is consulted for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationMode {
    /// Primary is confident: ask the reasoning service to confirm or correct it
    Verify,
    /// Primary is unsure: ask the reasoning service what the item actually is
    Identify,
}

/// Provenance of the final category and guidance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResultSource {
    PrimaryOnly,
    PrimaryPlusSecondaryAgreed,
    SecondaryCorrected,
    SecondaryLowConfidence,
    FallbackOnly,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DisposalInstructions {
    pub steps: Vec<String>,
    pub dos: Vec<String>,
    pub donts: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EnvironmentalImpact {
    pub description: String,
    pub co2: String,
    pub water: String,
    pub energy: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Awareness {
    pub fact: String,
    pub global_impact: String,
    pub local_tip: String,
}

/// Record of a disagreement between primary and reasoning service in Verify mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConflictDetails {
    #[schema(value_type = String)]
    pub model_said: WasteCategory,
    pub model_confidence: u8,
    #[schema(value_type = String)]
    pub secondary_said: WasteCategory,
    pub reasoning: String,
}

/// Canonical classification result handed to persistence and response layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    #[schema(value_type = String)]
    pub category: WasteCategory,
    pub specific_item: Option<String>,
    pub item_description: Option<String>,
    /// Always the primary classifier's confidence
    pub confidence: u8,
    pub source: ResultSource,
    pub had_conflict: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conflict_details: Option<ConflictDetails>,
    pub is_waste: bool,
    pub is_extended_category: bool,
    pub disposal_guidance: String,
    pub disposal_instructions: DisposalInstructions,
    pub environmental_impact: EnvironmentalImpact,
    pub awareness: Option<Awareness>,
    pub alternatives: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Everything the service returns for one classified image
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationOutcome {
    pub result: ClassificationResult,
    pub eco_score: u32,
    pub mode: ClassificationMode,
    pub classified_at: DateTime<Utc>,
}

/// Join disposal steps into the single guidance sentence shown to users
pub fn join_guidance(steps: &[String]) -> String {
    steps.join(". ")
}
