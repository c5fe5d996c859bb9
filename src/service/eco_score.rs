//! Eco score: reward points for a classified item

use crate::model::{ClassificationResult, CoreCategory, WasteCategory};

fn base_points(category: &WasteCategory) -> u32 {
    match category.core() {
        Some(CoreCategory::Glass) | Some(CoreCategory::Metal) => 10,
        Some(CoreCategory::Paper) => 9,
        Some(CoreCategory::Plastic) | Some(CoreCategory::Organic) => 8,
        Some(CoreCategory::Hazardous) => 5,
        None => 0,
    }
}

/// Points for a category at a given confidence percentage.
///
/// Confidence outside 0..=100 is clamped; NaN counts as 0.
pub fn score(category: &WasteCategory, confidence: f64) -> u32 {
    let confidence = if confidence.is_nan() {
        0.0
    } else {
        confidence.clamp(0.0, 100.0)
    };

    (f64::from(base_points(category)) * confidence / 100.0).round() as u32
}

/// Points for a final result; items that are not waste earn nothing
pub fn score_result(result: &ClassificationResult) -> u32 {
    if !result.is_waste {
        return 0;
    }
    score(&result.category, f64::from(result.confidence))
}
