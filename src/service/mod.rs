pub mod classification;
pub mod eco_score;
pub mod knowledge_base;
pub mod primary;
pub mod reasoning;
pub mod resolver;
pub mod router;

#[cfg(test)]
pub mod testing;

pub use classification::{ClassificationError, ClassificationService};
pub use primary::HttpPrimaryClassifier;
pub use reasoning::SecondaryReasoningClient;
