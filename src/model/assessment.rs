//! Reasoning service assessments in domain form
//!
//! Produced by the converters in `service::reasoning` once a response has been
//! parsed and validated. An absent assessment is modelled by the caller as
//! `Option::None`, never by a placeholder value.

use crate::model::category::WasteCategory;
use crate::model::classification::{Awareness, DisposalInstructions, EnvironmentalImpact};

/// Item-specific guidance shared by both assessment kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemGuidance {
    pub item_identified: String,
    pub item_description: Option<String>,
    pub is_waste: bool,
    pub disposal_instructions: DisposalInstructions,
    pub environmental_impact: EnvironmentalImpact,
    pub awareness: Option<Awareness>,
    pub alternatives: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    AgreesWithPrimary,
    /// The reasoning service thinks the item belongs to another category
    Corrected(WasteCategory),
}

/// Answer to "is the primary classifier right about this image?"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyAssessment {
    pub verdict: Verdict,
    pub reasoning: String,
    pub guidance: ItemGuidance,
}

/// An item the reasoning service managed to identify
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifiedItem {
    pub category: WasteCategory,
    pub confidence_in_identification: Option<u8>,
    pub message: Option<String>,
    pub guidance: ItemGuidance,
}

/// Answer to "what is this item?"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifyAssessment {
    Identified(IdentifiedItem),
    /// The service responded but could not say what the image shows
    NotIdentified,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecondaryAssessment {
    Verify(VerifyAssessment),
    Identify(IdentifyAssessment),
}
