//! Behavior configuration from TOML (`[behavior]` section)

use multillm_application::BehaviorConfig;
use serde::{Deserialize, Serialize};

/// Raw behavior configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBehaviorConfig {
    /// Record every step of a run in its trail
    pub verbose: bool,
    /// Abandon a run after this many seconds
    pub timeout_seconds: Option<u64>,
    /// Abandon a single HTTP request after this many seconds
    pub request_timeout_seconds: Option<u64>,
}

impl Default for FileBehaviorConfig {
    fn default() -> Self {
        Self {
            verbose: true,
            timeout_seconds: None,
            request_timeout_seconds: None,
        }
    }
}

impl FileBehaviorConfig {
    pub fn to_behavior(&self) -> BehaviorConfig {
        BehaviorConfig::from_timeout_seconds(self.timeout_seconds).with_verbose(self.verbose)
    }
}
