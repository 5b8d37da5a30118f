//! Judge list from TOML (`[judges]` section)

use serde::{Deserialize, Serialize};

/// Raw judge configuration from TOML
///
/// Names refer to `[[models]]` entries. A judge does not have to be enabled
/// for answering, and the same name may appear more than once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileJudgesConfig {
    pub models: Vec<String>,
}
