//! Comparison configuration container.
//!
//! [`CompareConfig`] is what the use case needs to run: the enabled models in
//! registry order, the ordered judge list and the behavior settings. The
//! infrastructure layer builds it from the file configuration.

use super::BehaviorConfig;
use crate::ports::model_client::SharedModelClient;
use std::fmt;

#[derive(Clone, Default)]
pub struct CompareConfig {
    /// Enabled models, in registry order. Positions drive the fixed protocols.
    pub models: Vec<SharedModelClient>,
    /// Judges, in configured order. Entries may repeat or also appear in `models`.
    pub judges: Vec<SharedModelClient>,
    pub behavior: BehaviorConfig,
}

impl CompareConfig {
    pub fn new(models: Vec<SharedModelClient>, judges: Vec<SharedModelClient>) -> Self {
        Self {
            models,
            judges,
            behavior: BehaviorConfig::default(),
        }
    }

    pub fn with_behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn model_names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.name()).collect()
    }

    pub fn judge_names(&self) -> Vec<&str> {
        self.judges.iter().map(|m| m.name()).collect()
    }

    /// Judge for a fixed protocol step; the index wraps around the judge list.
    pub fn judge_at(&self, index: usize) -> Option<&SharedModelClient> {
        if self.judges.is_empty() {
            None
        } else {
            self.judges.get(index % self.judges.len())
        }
    }

    /// First judge that is neither of the two paired models.
    pub fn judge_excluding(&self, first: &str, second: &str) -> Option<&SharedModelClient> {
        self.judges
            .iter()
            .find(|j| j.name() != first && j.name() != second)
    }
}

impl fmt::Debug for CompareConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompareConfig")
            .field("models", &self.model_names())
            .field("judges", &self.judge_names())
            .field("behavior", &self.behavior)
            .finish()
    }
}
