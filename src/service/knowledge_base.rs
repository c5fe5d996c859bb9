//! Static disposal guidance used when the reasoning service gives nothing usable
//!
//! Covers exactly the six core categories. Any other category gets a generic
//! entry with the category name interpolated, so lookups never fail.

use crate::model::{
    Awareness, CoreCategory, DisposalInstructions, EnvironmentalImpact, WasteCategory,
};

struct StaticEntry {
    steps: &'static [&'static str],
    dos: &'static [&'static str],
    donts: &'static [&'static str],
    benefit: &'static str,
    co2: &'static str,
    water: &'static str,
    energy: &'static str,
    fact: &'static str,
}

const GLASS: StaticEntry = StaticEntry {
    steps: &[
        "Rinse the glass item thoroughly",
        "Remove lids and caps",
        "Place in green/glass bin",
        "Wrap if broken",
    ],
    dos: &["Rinse before recycling", "Remove metal caps", "Separate by color"],
    donts: &["No broken ceramics", "No regular trash", "No light bulbs"],
    benefit: "Glass is 100% recyclable endlessly",
    co2: "0.3 kg",
    water: "1.2 liters",
    energy: "1.0 kWh",
    fact: "Recycling one glass bottle powers a computer for 25 minutes!",
};

const PLASTIC: StaticEntry = StaticEntry {
    steps: &[
        "Check recycling number",
        "Rinse thoroughly",
        "Remove caps and labels",
        "Place in blue bin",
    ],
    dos: &["Rinse containers", "Check symbols", "Flatten bottles"],
    donts: &["No plastic bags", "No food waste", "No burning"],
    benefit: "Reduces ocean pollution and saves petroleum",
    co2: "0.5 kg",
    water: "2.0 liters",
    energy: "1.5 kWh",
    fact: "Plastic bottles take 450 years to decompose!",
};

const PAPER: StaticEntry = StaticEntry {
    steps: &[
        "Keep dry and clean",
        "Remove plastic parts",
        "Flatten boxes",
        "Place in blue bin",
    ],
    dos: &["Keep dry", "Remove plastic", "Flatten boxes"],
    donts: &["No wet paper", "No tissue", "No wax-coated"],
    benefit: "Saves trees and reduces landfill waste",
    co2: "0.4 kg",
    water: "3.0 liters",
    energy: "2.0 kWh",
    fact: "One ton of recycled paper saves 17 trees!",
};

const METAL: StaticEntry = StaticEntry {
    steps: &[
        "Rinse containers",
        "Remove labels",
        "Crush cans",
        "Place in blue bin",
    ],
    dos: &["Rinse thoroughly", "Remove labels", "Crush cans"],
    donts: &["No paint cans", "No aerosols", "No food waste"],
    benefit: "Saves 95% energy vs new metal production",
    co2: "0.6 kg",
    water: "1.5 liters",
    energy: "2.5 kWh",
    fact: "Aluminum cans recycled in 60 days!",
};

const ORGANIC: StaticEntry = StaticEntry {
    steps: &[
        "Separate from packaging",
        "Place in green bin",
        "Consider composting",
        "Keep separate",
    ],
    dos: &[
        "Compost at home",
        "Use biodegradable bags",
        "Keep moist separate",
    ],
    donts: &["No plastic", "No meat bones", "No dry waste"],
    benefit: "Reduces methane and creates rich soil",
    co2: "0.2 kg",
    water: "0.5 liters",
    energy: "0.5 kWh",
    fact: "Food waste produces methane, 25x worse than CO2!",
};

const HAZARDOUS: StaticEntry = StaticEntry {
    steps: &[
        "Do NOT use regular trash",
        "Store safely",
        "Take to facility",
        "Contact authorities",
    ],
    dos: &["Store safely", "Use facilities", "Follow guidelines"],
    donts: &["Never burn", "No drains", "No regular trash"],
    benefit: "Prevents soil and water contamination",
    co2: "0.1 kg",
    water: "0.3 liters",
    energy: "0.2 kWh",
    fact: "One battery contaminates 600,000 liters of water!",
};

const LOCAL_TIP: &str = "Check with local authorities for specific disposal guidelines";

/// Alternatives suggested whenever guidance comes from this table
pub const GENERIC_ALTERNATIVES: &[&str] =
    &["Reduce consumption", "Reuse when possible", "Recycle properly"];

/// Guidance for one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackGuidance {
    pub instructions: DisposalInstructions,
    pub impact: EnvironmentalImpact,
    pub fact: String,
}

impl FallbackGuidance {
    /// Awareness block derived from the entry's fact
    pub fn awareness(&self, category: &WasteCategory) -> Awareness {
        Awareness {
            fact: self.fact.clone(),
            global_impact: format!(
                "{} waste management is crucial for environmental protection",
                category
            ),
            local_tip: LOCAL_TIP.to_string(),
        }
    }
}

/// Look up disposal guidance for a category
pub fn lookup(category: &WasteCategory) -> FallbackGuidance {
    match category.core() {
        Some(core) => from_static(static_entry(core)),
        None => synthesize(category.as_str()),
    }
}

fn static_entry(category: CoreCategory) -> &'static StaticEntry {
    match category {
        CoreCategory::Glass => &GLASS,
        CoreCategory::Hazardous => &HAZARDOUS,
        CoreCategory::Metal => &METAL,
        CoreCategory::Organic => &ORGANIC,
        CoreCategory::Paper => &PAPER,
        CoreCategory::Plastic => &PLASTIC,
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn from_static(entry: &StaticEntry) -> FallbackGuidance {
    FallbackGuidance {
        instructions: DisposalInstructions {
            steps: to_strings(entry.steps),
            dos: to_strings(entry.dos),
            donts: to_strings(entry.donts),
        },
        impact: EnvironmentalImpact {
            description: entry.benefit.to_string(),
            co2: entry.co2.to_string(),
            water: entry.water.to_string(),
            energy: entry.energy.to_string(),
        },
        fact: entry.fact.to_string(),
    }
}

fn synthesize(category: &str) -> FallbackGuidance {
    FallbackGuidance {
        instructions: DisposalInstructions {
            steps: vec![format!("Dispose {} waste in the appropriate bin", category)],
            dos: vec!["Follow local recycling guidelines".to_string()],
            donts: vec!["Do not mix with other waste types".to_string()],
        },
        impact: EnvironmentalImpact {
            description: format!("Recycling {} helps the environment", category),
            co2: "0.3 kg".to_string(),
            water: "1 liter".to_string(),
            energy: "1 kWh".to_string(),
        },
        fact: format!("Proper {} disposal is important for our planet", category),
    }
}
