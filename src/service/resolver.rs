//! Conflict resolution between the primary classifier and the reasoning service
//!
//! Produces exactly one `ClassificationResult` per request. Output confidence is
//! always the primary classifier's: the reasoning service may change what was
//! detected, never how sure the image signal was.

use crate::model::{
    ClassificationMode, ClassificationResult, ConflictDetails, IdentifiedItem, IdentifyAssessment,
    ItemGuidance, PrimaryPrediction, ResultSource, SecondaryAssessment, Verdict, WasteCategory,
    join_guidance,
};
use crate::service::knowledge_base::{self, GENERIC_ALTERNATIVES};

/// Merge primary output and the (possibly absent) reasoning assessment
pub fn resolve(
    primary: &PrimaryPrediction,
    secondary: Option<SecondaryAssessment>,
    mode: ClassificationMode,
) -> ClassificationResult {
    match (mode, secondary) {
        (_, None) => {
            tracing::warn!(
                category = %primary.category,
                confidence = primary.confidence,
                mode = ?mode,
                "Reasoning service unavailable, using primary result with fallback guidance"
            );
            from_knowledge_base(primary, ResultSource::FallbackOnly)
        }
        (ClassificationMode::Verify, Some(SecondaryAssessment::Verify(verify))) => {
            match verify.verdict {
                Verdict::AgreesWithPrimary => agreed(primary, verify.guidance),
                Verdict::Corrected(category) if category == primary.category => {
                    tracing::debug!(
                        category = %category,
                        "Correction names the primary category, treating it as agreement"
                    );
                    agreed(primary, verify.guidance)
                }
                Verdict::Corrected(category) => {
                    corrected(primary, category, verify.reasoning, verify.guidance)
                }
            }
        }
        (ClassificationMode::Identify, Some(SecondaryAssessment::Identify(identify))) => {
            match identify {
                IdentifyAssessment::Identified(item) => identified(primary, item),
                IdentifyAssessment::NotIdentified => {
                    tracing::warn!(
                        category = %primary.category,
                        confidence = primary.confidence,
                        "Reasoning service could not identify the item, falling back to primary category"
                    );
                    from_knowledge_base(primary, ResultSource::FallbackOnly)
                }
            }
        }
        (mode, Some(_)) => {
            tracing::warn!(
                mode = ?mode,
                "Assessment kind does not match request mode, using fallback guidance"
            );
            from_knowledge_base(primary, ResultSource::FallbackOnly)
        }
    }
}

/// Result for requests where the reasoning service is switched off
pub fn primary_only(primary: &PrimaryPrediction) -> ClassificationResult {
    from_knowledge_base(primary, ResultSource::PrimaryOnly)
}

fn from_knowledge_base(primary: &PrimaryPrediction, source: ResultSource) -> ClassificationResult {
    let guidance = knowledge_base::lookup(&primary.category);
    let awareness = guidance.awareness(&primary.category);

    ClassificationResult {
        category: primary.category.clone(),
        specific_item: Some(format!("{} item", primary.category)),
        item_description: None,
        confidence: primary.confidence,
        source,
        had_conflict: false,
        conflict_details: None,
        is_waste: true,
        is_extended_category: primary.category.is_extended(),
        disposal_guidance: join_guidance(&guidance.instructions.steps),
        disposal_instructions: guidance.instructions,
        environmental_impact: guidance.impact,
        awareness: Some(awareness),
        alternatives: Some(GENERIC_ALTERNATIVES.iter().map(|s| s.to_string()).collect()),
        message: None,
    }
}

fn agreed(primary: &PrimaryPrediction, guidance: ItemGuidance) -> ClassificationResult {
    tracing::info!(
        category = %primary.category,
        item = %guidance.item_identified,
        "Reasoning service agrees with primary classification"
    );

    from_guidance(
        primary.category.clone(),
        primary.confidence,
        ResultSource::PrimaryPlusSecondaryAgreed,
        None,
        guidance,
        None,
    )
}

fn corrected(
    primary: &PrimaryPrediction,
    category: WasteCategory,
    reasoning: String,
    guidance: ItemGuidance,
) -> ClassificationResult {
    tracing::warn!(
        model_said = %primary.category,
        model_confidence = primary.confidence,
        secondary_said = %category,
        reasoning = %reasoning,
        "Classification conflict, trusting reasoning service"
    );

    let conflict = ConflictDetails {
        model_said: primary.category.clone(),
        model_confidence: primary.confidence,
        secondary_said: category.clone(),
        reasoning,
    };

    from_guidance(
        category,
        primary.confidence,
        ResultSource::SecondaryCorrected,
        Some(conflict),
        guidance,
        None,
    )
}

fn identified(primary: &PrimaryPrediction, item: IdentifiedItem) -> ClassificationResult {
    tracing::info!(
        primary_category = %primary.category,
        category = %item.category,
        item = %item.guidance.item_identified,
        is_waste = item.guidance.is_waste,
        identification_confidence = ?item.confidence_in_identification,
        "Reasoning service identified low-confidence item"
    );

    let message = if item.guidance.is_waste {
        None
    } else {
        item.message
    };

    from_guidance(
        item.category,
        primary.confidence,
        ResultSource::SecondaryLowConfidence,
        None,
        item.guidance,
        message,
    )
}

fn from_guidance(
    category: WasteCategory,
    confidence: u8,
    source: ResultSource,
    conflict_details: Option<ConflictDetails>,
    guidance: ItemGuidance,
    message: Option<String>,
) -> ClassificationResult {
    ClassificationResult {
        is_extended_category: category.is_extended(),
        category,
        specific_item: Some(guidance.item_identified),
        item_description: guidance.item_description,
        confidence,
        source,
        had_conflict: conflict_details.is_some(),
        conflict_details,
        is_waste: guidance.is_waste,
        disposal_guidance: join_guidance(&guidance.disposal_instructions.steps),
        disposal_instructions: guidance.disposal_instructions,
        environmental_impact: guidance.environmental_impact,
        awareness: guidance.awareness,
        alternatives: Some(guidance.alternatives),
        message,
    }
}
