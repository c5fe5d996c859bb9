//! Waste category vocabulary
//!
//! The primary classifier only knows the six core categories. The reasoning
//! service can name anything else (textile, e-waste, battery, ...), which is
//! carried verbatim as an extended category.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Categories the primary classifier was trained on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoreCategory {
    Glass,
    Hazardous,
    Metal,
    Organic,
    Paper,
    Plastic,
}

impl CoreCategory {
    pub const ALL: [CoreCategory; 6] = [
        CoreCategory::Glass,
        CoreCategory::Hazardous,
        CoreCategory::Metal,
        CoreCategory::Organic,
        CoreCategory::Paper,
        CoreCategory::Plastic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CoreCategory::Glass => "glass",
            CoreCategory::Hazardous => "hazardous",
            CoreCategory::Metal => "metal",
            CoreCategory::Organic => "organic",
            CoreCategory::Paper => "paper",
            CoreCategory::Plastic => "plastic",
        }
    }

    fn from_normalized(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == label)
    }
}

/// A waste category: one of the core six, or free text from the reasoning service
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WasteCategory {
    Core(CoreCategory),
    Extended(String),
}

impl WasteCategory {
    /// Parse a label coming from either external service.
    ///
    /// Labels are trimmed and lower-cased. Returns `None` for an empty label.
    /// Unrecognised labels are kept as extended categories rather than rejected.
    pub fn parse(label: &str) -> Option<Self> {
        let normalized = label.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }

        Some(match CoreCategory::from_normalized(&normalized) {
            Some(core) => WasteCategory::Core(core),
            None => WasteCategory::Extended(normalized),
        })
    }

    pub fn as_str(&self) -> &str {
        match self {
            WasteCategory::Core(core) => core.as_str(),
            WasteCategory::Extended(label) => label,
        }
    }

    pub fn core(&self) -> Option<CoreCategory> {
        match self {
            WasteCategory::Core(core) => Some(*core),
            WasteCategory::Extended(_) => None,
        }
    }

    pub fn is_extended(&self) -> bool {
        matches!(self, WasteCategory::Extended(_))
    }
}

impl From<CoreCategory> for WasteCategory {
    fn from(core: CoreCategory) -> Self {
        WasteCategory::Core(core)
    }
}

impl fmt::Display for WasteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for WasteCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for WasteCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        WasteCategory::parse(&label)
            .ok_or_else(|| serde::de::Error::custom("waste category must not be empty"))
    }
}
