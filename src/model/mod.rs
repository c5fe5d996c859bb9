pub mod assessment;
pub mod category;
pub mod classification;
pub mod config;
pub mod extracted;

pub use assessment::*;
pub use category::{CoreCategory, WasteCategory};
pub use classification::*;
pub use config::{Config, PrimaryConfig, ReasoningConfig};
