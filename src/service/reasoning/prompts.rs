//! Prompts for the reasoning service

use crate::model::{CoreCategory, WasteCategory};

/// Shared preamble for both modes
pub const REASONING_SYSTEM_PROMPT: &str = "You are a waste management expert.";

const CATEGORY_CHOICES: &str =
    "glass/hazardous/metal/organic/paper/plastic/textile/e-waste/battery/furniture/other";

const GUIDANCE_SHAPE: &str = r#"  "disposal_instructions": {
    "steps": ["step 1", "step 2", "step 3", "step 4"],
    "dos": ["do 1", "do 2", "do 3"],
    "donts": ["dont 1", "dont 2", "dont 3"]
  },"#;

fn trained_categories() -> String {
    CoreCategory::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Prompt asking whether the primary label is right
pub fn build_verify_prompt(primary_category: &WasteCategory, confidence: u8) -> String {
    format!(
        r#"{system}

Our image classifier labelled this image as "{category}" with {confidence}% confidence.

Your task:
1. Analyze the image carefully
2. Determine if you AGREE or DISAGREE with the classification
3. If you disagree, identify what it actually is

IMPORTANT DISTINCTIONS:
- The classifier is trained on: {trained}
- "organic" means FOOD WASTE, YARD WASTE, BIODEGRADABLE WASTE (banana peels, leaves, etc.)
- "organic" does NOT mean cloth/textile (even if cotton/natural fiber)
- "organic" does NOT mean wood furniture
- If you see cloth/textile, the category is "textile", NOT "organic"
- If you see electronics, the category is "e-waste", NOT "metal"
- If you see batteries, the category is "battery", NOT just "hazardous"
- If you see furniture, the category is "furniture", NOT "organic" or "paper"

Return JSON with:
{{
  "agrees_with_model": true/false,
  "item_identified": "specific item name (e.g., plastic water bottle, cotton t-shirt, smartphone)",
  "item_description": "brief description of the item",
  "correct_category": "{choices}",
  "reasoning": "explain why you agree or disagree with the classifier",
  "is_waste": true/false,
{guidance}
  "environmental_impact": {{
    "recycling_benefits": "specific benefit for this item",
    "co2_saved": "0.5 kg",
    "water_saved": "2 liters",
    "energy_saved": "1.5 kWh"
  }},
  "awareness": {{
    "did_you_know": "interesting fact about this specific item",
    "global_impact": "global statistics about this item type",
    "local_tip": "local recycling tip"
  }},
  "alternatives": ["eco-friendly alternative 1", "alternative 2", "alternative 3"]
}}

Make instructions SPECIFIC to the actual item you see in the image.
If you disagree with the classifier, provide disposal instructions for the CORRECT item.
Return ONLY valid JSON, no markdown or extra text."#,
        system = REASONING_SYSTEM_PROMPT,
        category = primary_category,
        confidence = confidence,
        trained = trained_categories(),
        choices = CATEGORY_CHOICES,
        guidance = GUIDANCE_SHAPE,
    )
}

/// Prompt asking what the item is, and whether it is waste at all
pub fn build_identify_prompt(suggested_category: &WasteCategory, confidence: u8) -> String {
    format!(
        r#"{system}

Our image classifier labelled this image as "{category}" but with LOW confidence ({confidence}%).
This suggests the item might not be in the trained categories: {trained}.

Your task:
1. Identify what this item actually is
2. Determine if it's waste or not
3. Categorize it appropriately
4. Provide disposal guidance

Return JSON with:
{{
  "item_identified": "specific item name (e.g., cloth shirt, electronic device, battery, furniture), or \"unknown item\" if you cannot tell",
  "item_description": "brief description",
  "is_waste": true/false,
  "category": "{choices}",
  "confidence_in_identification": 0-100,
{guidance}
  "environmental_impact": {{
    "recycling_benefits": "benefit if recyclable, or environmental concern if not",
    "co2_saved": "0 kg if not recyclable",
    "water_saved": "0 liters if not recyclable",
    "energy_saved": "0 kWh if not recyclable"
  }},
  "awareness": {{
    "did_you_know": "fact about this item",
    "global_impact": "statistics",
    "local_tip": "local tip"
  }},
  "alternatives": ["alternative 1", "alternative 2", "alternative 3"],
  "message": "friendly message to user explaining what this is and how to dispose"
}}

Special cases:
- If it's NOT waste (person, car, building, etc.), set is_waste: false and explain in the message instead of giving disposal guidance
- If it's e-waste (electronics), provide e-waste disposal guidance
- If it's textile/cloth, provide textile recycling guidance
- If it's battery, emphasize hazardous waste disposal
- If it's furniture, suggest donation or bulk waste pickup

Return ONLY valid JSON, no markdown or extra text."#,
        system = REASONING_SYSTEM_PROMPT,
        category = suggested_category,
        confidence = confidence,
        trained = trained_categories(),
        choices = CATEGORY_CHOICES,
        guidance = GUIDANCE_SHAPE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_prompt_disambiguates_near_misses() {
        let prompt = build_verify_prompt(&WasteCategory::parse("organic").unwrap(), 95);

        assert!(prompt.contains("\"organic\" with 95% confidence"));
        assert!(prompt.contains("\"textile\", NOT \"organic\""));
        assert!(prompt.contains("\"e-waste\", NOT \"metal\""));
        assert!(prompt.contains("\"battery\", NOT just \"hazardous\""));
        assert!(prompt.contains("\"furniture\", NOT \"organic\" or \"paper\""));
        assert!(prompt.contains("\"agrees_with_model\""));
    }

    #[test]
    fn test_identify_prompt_asks_about_non_waste() {
        let prompt = build_identify_prompt(&WasteCategory::parse("metal").unwrap(), 30);

        assert!(prompt.contains("LOW confidence (30%)"));
        assert!(prompt.contains("glass, hazardous, metal, organic, paper, plastic"));
        assert!(prompt.contains("NOT waste"));
        assert!(prompt.contains("\"message\""));
        assert!(prompt.contains("unknown item"));
    }
}
