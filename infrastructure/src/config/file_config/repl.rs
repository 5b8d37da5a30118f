//! Interactive mode configuration from TOML (`[repl]` section)

use serde::{Deserialize, Serialize};

/// Raw REPL configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Text shown before each input line
    pub prompt: String,
    /// Show progress bars while a run is in flight
    pub show_progress: bool,
    /// History file; defaults to the user data directory
    pub history_file: Option<String>,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            prompt: "prompt> ".to_string(),
            show_progress: true,
            history_file: None,
        }
    }
}
