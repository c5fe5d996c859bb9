//! Wire models for the reasoning service's JSON answers
//!
//! Field names follow the JSON layout requested in the prompts. Required
//! fields have no serde default, so a payload missing them fails to parse.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedDisposalInstructions {
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub dos: Vec<String>,
    #[serde(default)]
    pub donts: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedEnvironmentalImpact {
    #[serde(default)]
    pub recycling_benefits: String,
    #[serde(default)]
    pub co2_saved: String,
    #[serde(default)]
    pub water_saved: String,
    #[serde(default)]
    pub energy_saved: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedAwareness {
    #[serde(default)]
    pub did_you_know: String,
    #[serde(default)]
    pub global_impact: String,
    #[serde(default)]
    pub local_tip: String,
}

/// Verify-mode answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedVerification {
    pub agrees_with_model: bool,
    pub item_identified: String,
    pub item_description: Option<String>,
    #[serde(default)]
    pub correct_category: String,
    #[serde(default)]
    pub reasoning: String,
    pub is_waste: bool,
    pub disposal_instructions: ExtractedDisposalInstructions,
    pub environmental_impact: ExtractedEnvironmentalImpact,
    pub awareness: Option<ExtractedAwareness>,
    #[serde(default)]
    pub alternatives: Vec<String>,
}

/// Identify-mode answer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedIdentification {
    pub item_identified: String,
    pub item_description: Option<String>,
    pub is_waste: bool,
    #[serde(default)]
    pub category: String,
    pub confidence_in_identification: Option<f64>,
    // Non-waste and unidentified items may come back without guidance
    #[serde(default)]
    pub disposal_instructions: ExtractedDisposalInstructions,
    #[serde(default)]
    pub environmental_impact: ExtractedEnvironmentalImpact,
    pub awareness: Option<ExtractedAwareness>,
    #[serde(default)]
    pub alternatives: Vec<String>,
    pub message: Option<String>,
}
