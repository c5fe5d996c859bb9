//! Confidence routing between verification and identification

use crate::model::ClassificationMode;

/// Primary confidence at or above which the primary label is only verified
pub const CONFIDENCE_THRESHOLD: u8 = 50;

/// Pick how the reasoning service should be consulted for a given primary confidence
pub fn route(confidence: u8) -> ClassificationMode {
    if confidence >= CONFIDENCE_THRESHOLD {
        ClassificationMode::Verify
    } else {
        ClassificationMode::Identify
    }
}
