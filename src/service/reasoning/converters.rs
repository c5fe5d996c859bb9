//! Converters from the reasoning service's text answers to domain models

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use super::error::ReasoningError;
use super::validation::{
    AssessmentValidationResult, is_unknown_item, validate_identification, validate_verification,
};
use crate::model::extracted::{
    ExtractedAwareness, ExtractedDisposalInstructions, ExtractedEnvironmentalImpact,
    ExtractedIdentification, ExtractedVerification,
};
use crate::model::{
    Awareness, DisposalInstructions, EnvironmentalImpact, IdentifiedItem, IdentifyAssessment,
    ItemGuidance, Verdict, VerifyAssessment, WasteCategory,
};

/// Category given to non-waste subjects the service did not categorise
const NON_WASTE_CATEGORY: &str = "other";

// Outermost {...} span; answers sometimes arrive wrapped in prose or code fences
static JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("JSON object pattern is valid"));

/// Pull the JSON object out of a text answer and deserialize it
pub fn parse_answer<T: DeserializeOwned>(text: &str) -> Result<T, ReasoningError> {
    let json = JSON_OBJECT
        .find(text)
        .ok_or_else(|| ReasoningError::ParseError("No JSON object in answer".to_string()))?;

    serde_json::from_str(json.as_str())
        .map_err(|e| ReasoningError::ParseError(format!("Answer does not match schema: {}", e)))
}

/// Parse, validate, and convert a Verify-mode answer
pub fn convert_verification(text: &str) -> Result<VerifyAssessment, ReasoningError> {
    let extracted: ExtractedVerification = parse_answer(text)?;
    ensure_valid(validate_verification(&extracted))?;

    let verdict = if extracted.agrees_with_model {
        Verdict::AgreesWithPrimary
    } else {
        let category = WasteCategory::parse(&extracted.correct_category).ok_or_else(|| {
            ReasoningError::ValidationError("Corrected category is empty".to_string())
        })?;
        Verdict::Corrected(category)
    };

    Ok(VerifyAssessment {
        verdict,
        reasoning: extracted.reasoning,
        guidance: ItemGuidance {
            item_identified: extracted.item_identified,
            item_description: non_empty(extracted.item_description),
            is_waste: extracted.is_waste,
            disposal_instructions: convert_instructions(extracted.disposal_instructions),
            environmental_impact: convert_impact(extracted.environmental_impact),
            awareness: extracted.awareness.map(convert_awareness),
            alternatives: extracted.alternatives,
        },
    })
}

/// Parse, validate, and convert an Identify-mode answer
pub fn convert_identification(text: &str) -> Result<IdentifyAssessment, ReasoningError> {
    let extracted: ExtractedIdentification = parse_answer(text)?;

    if is_unknown_item(&extracted) {
        return Ok(IdentifyAssessment::NotIdentified);
    }

    ensure_valid(validate_identification(&extracted))?;

    let category = match WasteCategory::parse(&extracted.category) {
        Some(category) => category,
        None if !extracted.is_waste => WasteCategory::Extended(NON_WASTE_CATEGORY.to_string()),
        None => {
            return Err(ReasoningError::ValidationError(
                "Identified category is empty".to_string(),
            ));
        }
    };

    let confidence_in_identification = extracted
        .confidence_in_identification
        .filter(|c| !c.is_nan())
        .map(|c| c.round().clamp(0.0, 100.0) as u8);

    Ok(IdentifyAssessment::Identified(IdentifiedItem {
        category,
        confidence_in_identification,
        message: non_empty(extracted.message),
        guidance: ItemGuidance {
            item_identified: extracted.item_identified,
            item_description: non_empty(extracted.item_description),
            is_waste: extracted.is_waste,
            disposal_instructions: convert_instructions(extracted.disposal_instructions),
            environmental_impact: convert_impact(extracted.environmental_impact),
            awareness: extracted.awareness.map(convert_awareness),
            alternatives: extracted.alternatives,
        },
    }))
}

fn ensure_valid(validation: AssessmentValidationResult) -> Result<(), ReasoningError> {
    for warning in &validation.warnings {
        tracing::warn!(warning = %warning, "Reasoning answer validation warning");
    }

    if validation.is_valid {
        Ok(())
    } else {
        Err(ReasoningError::ValidationError(validation.errors.join("; ")))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn convert_instructions(extracted: ExtractedDisposalInstructions) -> DisposalInstructions {
    DisposalInstructions {
        steps: extracted.steps,
        dos: extracted.dos,
        donts: extracted.donts,
    }
}

fn convert_impact(extracted: ExtractedEnvironmentalImpact) -> EnvironmentalImpact {
    EnvironmentalImpact {
        description: extracted.recycling_benefits,
        co2: extracted.co2_saved,
        water: extracted.water_saved,
        energy: extracted.energy_saved,
    }
}

fn convert_awareness(extracted: ExtractedAwareness) -> Awareness {
    Awareness {
        fact: extracted.did_you_know,
        global_impact: extracted.global_impact,
        local_tip: extracted.local_tip,
    }
}
