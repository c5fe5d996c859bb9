//! Process-wide model rotation for the reasoning service
//!
//! The index only ever moves forward and stops at the last model. A cold
//! restart is the only way back to the first model.

use std::sync::atomic::{AtomicUsize, Ordering};

use super::error::ReasoningError;

/// Ordered model list plus the index of the model currently in use
#[derive(Debug)]
pub struct ModelRotation {
    models: Vec<String>,
    current: AtomicUsize,
}

impl ModelRotation {
    pub fn new(models: Vec<String>) -> Result<Self, ReasoningError> {
        if models.is_empty() {
            return Err(ReasoningError::Configuration(
                "model priority list must not be empty".to_string(),
            ));
        }

        Ok(Self {
            models,
            current: AtomicUsize::new(0),
        })
    }

    /// Number of models in the priority list
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Index and name of the model to use right now
    pub fn current(&self) -> (usize, &str) {
        let index = self.current.load(Ordering::Acquire);
        (index, &self.models[index])
    }

    /// Move past the model at `observed` after it reported quota exhaustion.
    ///
    /// Only the first caller that observed a given index advances it; callers
    /// holding a stale index get the already-advanced position. Returns `None`
    /// once the last model has been exhausted.
    pub fn advance_past(&self, observed: usize) -> Option<usize> {
        let last = self.models.len() - 1;
        if observed >= last {
            return None;
        }

        match self.current.compare_exchange(
            observed,
            observed + 1,
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => {
                tracing::warn!(
                    from = %self.models[observed],
                    to = %self.models[observed + 1],
                    "Switching reasoning model after quota exhaustion"
                );
                Some(observed + 1)
            }
            Err(actual) => Some(actual),
        }
    }
}
