//! Validation of parsed reasoning-service answers
//!
//! Errors make the whole answer unusable; warnings are only logged.

use crate::model::extracted::{ExtractedIdentification, ExtractedVerification};

/// Labels the reasoning service uses when it cannot tell what the image shows
const UNKNOWN_ITEM_LABELS: &[&str] = &["unknown", "unknown item"];

/// Result of assessment validation
#[derive(Debug)]
pub struct AssessmentValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl AssessmentValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }
}

/// Whether an identification answer is the "could not identify" sentinel
pub fn is_unknown_item(extracted: &ExtractedIdentification) -> bool {
    let label = extracted.item_identified.trim().to_lowercase();
    UNKNOWN_ITEM_LABELS.contains(&label.as_str())
}

/// Validate a Verify-mode answer
///
/// A disagreement must name the category it corrects to.
pub fn validate_verification(extracted: &ExtractedVerification) -> AssessmentValidationResult {
    let mut result = AssessmentValidationResult::valid();

    if !extracted.agrees_with_model && extracted.correct_category.trim().is_empty() {
        result.add_error("Disagreement without a corrected category".to_string());
    }

    if !extracted.agrees_with_model && extracted.reasoning.trim().is_empty() {
        result.add_warning("Disagreement without reasoning".to_string());
    }

    check_common(
        &extracted.item_identified,
        &extracted.disposal_instructions.steps,
        &mut result,
    );

    result
}

/// Validate an Identify-mode answer that is not the unknown sentinel
pub fn validate_identification(extracted: &ExtractedIdentification) -> AssessmentValidationResult {
    let mut result = AssessmentValidationResult::valid();

    // Non-waste subjects (people, cars, ...) often come back without a category
    if extracted.is_waste && extracted.category.trim().is_empty() {
        result.add_error("Identified waste item has no category".to_string());
    }

    if let Some(confidence) = extracted.confidence_in_identification {
        if !(0.0..=100.0).contains(&confidence) {
            result.add_warning(format!(
                "Identification confidence {} is outside 0-100",
                confidence
            ));
        }
    }

    if !extracted.is_waste
        && extracted
            .message
            .as_deref()
            .is_none_or(|m| m.trim().is_empty())
    {
        result.add_warning("Non-waste item without a user message".to_string());
    }

    check_common(
        &extracted.item_identified,
        &extracted.disposal_instructions.steps,
        &mut result,
    );

    result
}

fn check_common(item_identified: &str, steps: &[String], result: &mut AssessmentValidationResult) {
    if item_identified.trim().is_empty() {
        result.add_warning("Answer does not name the identified item".to_string());
    }

    if steps.is_empty() {
        result.add_warning("Answer has no disposal steps".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::extracted::{ExtractedDisposalInstructions, ExtractedEnvironmentalImpact};

    fn instructions(steps: &[&str]) -> ExtractedDisposalInstructions {
        ExtractedDisposalInstructions {
            steps: steps.iter().map(|s| s.to_string()).collect(),
            dos: vec![],
            donts: vec![],
        }
    }

    fn impact() -> ExtractedEnvironmentalImpact {
        ExtractedEnvironmentalImpact {
            recycling_benefits: "benefit".to_string(),
            co2_saved: "0.1 kg".to_string(),
            water_saved: "1 liter".to_string(),
            energy_saved: "1 kWh".to_string(),
        }
    }

    fn verification(agrees: bool, correct_category: &str) -> ExtractedVerification {
        ExtractedVerification {
            agrees_with_model: agrees,
            item_identified: "shirt".to_string(),
            item_description: None,
            correct_category: correct_category.to_string(),
            reasoning: "fabric".to_string(),
            is_waste: true,
            disposal_instructions: instructions(&["Donate"]),
            environmental_impact: impact(),
            awareness: None,
            alternatives: vec![],
        }
    }

    fn identification(item: &str, category: &str) -> ExtractedIdentification {
        ExtractedIdentification {
            item_identified: item.to_string(),
            item_description: None,
            is_waste: true,
            category: category.to_string(),
            confidence_in_identification: Some(80.0),
            disposal_instructions: instructions(&["Drop off"]),
            environmental_impact: impact(),
            awareness: None,
            alternatives: vec![],
            message: None,
        }
    }

    #[test]
    fn test_disagreement_requires_category() {
        let result = validate_verification(&verification(false, "  "));
        assert!(!result.is_valid);
        assert!(result.errors[0].contains("corrected category"));
    }

    #[test]
    fn test_agreement_without_category_is_valid() {
        let result = validate_verification(&verification(true, ""));
        assert!(result.is_valid);
    }

    #[test]
    fn test_missing_steps_is_only_a_warning() {
        let mut extracted = verification(false, "textile");
        extracted.disposal_instructions = instructions(&[]);
        let result = validate_verification(&extracted);
        assert!(result.is_valid);
        assert!(result.warnings.iter().any(|w| w.contains("no disposal steps")));
    }

    #[test]
    fn test_identification_requires_category() {
        assert!(!validate_identification(&identification("phone", "")).is_valid);
        assert!(validate_identification(&identification("phone", "e-waste")).is_valid);
    }

    #[test]
    fn test_non_waste_without_category_is_valid() {
        let mut extracted = identification("person", "");
        extracted.is_waste = false;
        extracted.message = Some("This is a person, not waste.".to_string());
        assert!(validate_identification(&extracted).is_valid);
    }

    #[test]
    fn test_out_of_range_confidence_warns() {
        let mut extracted = identification("phone", "e-waste");
        extracted.confidence_in_identification = Some(140.0);
        let result = validate_identification(&extracted);
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_unknown_item_sentinel() {
        assert!(is_unknown_item(&identification("Unknown Item", "plastic")));
        assert!(is_unknown_item(&identification(" unknown ", "")));
        assert!(!is_unknown_item(&identification("unknown brand bottle", "plastic")));
    }
}
