//! Scripted in-memory collaborators for service tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::model::{PrimaryPrediction, WasteCategory};
use crate::service::primary::{PrimaryClassifier, PrimaryClassifierError};
use crate::service::reasoning::{ReasoningBackend, ReasoningError, ReasoningRequest};

/// Reasoning backend that replays canned answers and records each call
pub struct ScriptedBackend {
    answers: Mutex<VecDeque<Result<String, ReasoningError>>>,
    calls: Mutex<Vec<String>>,
    requests: Mutex<Vec<ReasoningRequest>>,
}

impl ScriptedBackend {
    pub fn new(answers: Vec<Result<String, ReasoningError>>) -> Self {
        Self {
            answers: Mutex::new(answers.into()),
            calls: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Models called so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<ReasoningRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ReasoningBackend for ScriptedBackend {
    async fn generate(
        &self,
        model: &str,
        request: &ReasoningRequest,
    ) -> Result<String, ReasoningError> {
        self.calls.lock().unwrap().push(model.to_string());
        self.requests.lock().unwrap().push(request.clone());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ReasoningError::ParseError("script exhausted".to_string())))
    }
}

/// Primary classifier that always answers with the same result
pub struct FixedPrimary {
    answer: Result<(String, f64), u16>,
}

impl FixedPrimary {
    pub fn predicting(category: &str, confidence: f64) -> Self {
        Self {
            answer: Ok((category.to_string(), confidence)),
        }
    }

    /// Fails every call with the given HTTP status
    pub fn failing(status: u16) -> Self {
        Self {
            answer: Err(status),
        }
    }
}

#[async_trait]
impl PrimaryClassifier for FixedPrimary {
    async fn classify(
        &self,
        _image: &[u8],
        _filename: &str,
        _mime_type: Option<&str>,
    ) -> Result<PrimaryPrediction, PrimaryClassifierError> {
        match &self.answer {
            Ok((category, confidence)) => {
                let category = WasteCategory::parse(category).ok_or_else(|| {
                    PrimaryClassifierError::InvalidResponse("empty category".to_string())
                })?;
                Ok(PrimaryPrediction::from_raw(category, *confidence))
            }
            Err(status) if (400..500).contains(status) => Err(PrimaryClassifierError::Rejected {
                status: *status,
                body: "rejected".to_string(),
            }),
            Err(status) => Err(PrimaryClassifierError::UnexpectedStatus {
                status: *status,
                body: "down".to_string(),
            }),
        }
    }

    async fn health(&self) -> Result<(), PrimaryClassifierError> {
        match &self.answer {
            Ok(_) => Ok(()),
            Err(status) => Err(PrimaryClassifierError::UnexpectedStatus {
                status: *status,
                body: "down".to_string(),
            }),
        }
    }
}

pub fn quota_error() -> ReasoningError {
    ReasoningError::QuotaExceeded("429 Too Many Requests".to_string())
}

/// Verify answer that agrees with the primary label
pub fn agree_answer() -> String {
    r#"{
  "agrees_with_model": true,
  "item_identified": "plastic water bottle",
  "item_description": "Clear PET bottle",
  "reasoning": "Clearly a PET bottle",
  "is_waste": true,
  "disposal_instructions": {"steps": ["Empty the bottle", "Crush it", "Put it in the plastic bin"], "dos": ["Rinse"], "donts": ["Burn"]},
  "environmental_impact": {"recycling_benefits": "PET is fully recyclable", "co2_saved": "0.1 kg", "water_saved": "1 liter", "energy_saved": "0.5 kWh"},
  "awareness": {"did_you_know": "A bottle takes 450 years to decompose", "global_impact": "1M bottles a minute", "local_tip": "Use deposit machines"},
  "alternatives": ["Reusable bottle"]
}"#
    .to_string()
}

/// Verify answer correcting the primary label to textile
pub fn textile_correction_answer() -> String {
    r#"{
  "agrees_with_model": false,
  "item_identified": "cotton t-shirt",
  "item_description": "Worn cotton t-shirt",
  "correct_category": "textile",
  "reasoning": "This is cloth, not food waste",
  "is_waste": true,
  "disposal_instructions": {"steps": ["Wash it", "Donate or drop at textile bank"], "dos": ["Donate"], "donts": ["Put it in the organic bin"]},
  "environmental_impact": {"recycling_benefits": "Textile reuse saves water", "co2_saved": "2 kg", "water_saved": "2700 liters", "energy_saved": "3 kWh"},
  "alternatives": ["Buy second hand"]
}"#
    .to_string()
}

/// Identify answer naming an e-waste item
pub fn ewaste_identification_answer() -> String {
    r#"{
  "item_identified": "old smartphone",
  "item_description": "Cracked smartphone",
  "is_waste": true,
  "category": "e-waste",
  "confidence_in_identification": 90,
  "disposal_instructions": {"steps": ["Wipe personal data", "Take it to an e-waste collection point"], "dos": ["Remove the SIM"], "donts": ["Throw in general waste"]},
  "environmental_impact": {"recycling_benefits": "Recovers precious metals", "co2_saved": "1 kg", "water_saved": "0 liters", "energy_saved": "2 kWh"},
  "alternatives": ["Repair", "Trade in"],
  "message": "This is an old phone."
}"#
    .to_string()
}
