//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod behavior;
mod judges;
mod models;
mod output;
mod repl;
mod web;

pub use behavior::FileBehaviorConfig;
pub use judges::FileJudgesConfig;
pub use models::FileModelConfig;
pub use output::FileOutputConfig;
pub use repl::FileReplConfig;
pub use web::FileWebConfig;

use multillm_domain::{ConfigIssue, ConfigIssueCode, Protocol};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Trail verbosity and timeouts
    pub behavior: FileBehaviorConfig,
    /// Model registry, in schedule order
    pub models: Vec<FileModelConfig>,
    /// Ordered judge list
    pub judges: FileJudgesConfig,
    /// Web front end settings
    pub web: FileWebConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. Model entries (names, kinds, selectors, URLs, API keys)
    /// 2. Judge names against the registry
    /// 3. The number of enabled models
    /// 4. Protocol names used by the web front end
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Model entries
        let mut seen = HashSet::new();
        for model in &self.models {
            if model.name.trim().is_empty() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::EmptyModelName,
                    "models: every entry needs a non-empty name",
                ));
                continue;
            }
            if !seen.insert(model.name.as_str()) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::DuplicateModelName {
                        name: model.name.clone(),
                    },
                    format!("models: '{}' is defined more than once", model.name),
                ));
            }
            issues.extend(model.build_client().1);
        }

        // 2. Judges
        if self.judges.models.is_empty() && !self.models.is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::NoJudges,
                "judges.models is empty; only the 'none' protocol can run",
            ));
        }
        for judge in &self.judges.models {
            if !self.models.iter().any(|m| &m.name == judge) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::UnknownJudge {
                        name: judge.clone(),
                    },
                    format!("judges.models: '{}' is not a configured model", judge),
                ));
            }
        }

        // 3. Enabled models
        let enabled = self.enabled_models().count();
        if enabled < 2 && !self.models.is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::TooFewEnabledModels { enabled },
                format!("only {} model(s) enabled; comparisons need at least 2", enabled),
            ));
        }

        // 4. Web protocols
        let web_protocols = std::iter::once(("web.protocol", &self.web.protocol)).chain(
            self.web
                .protocols
                .iter()
                .map(|p| ("web.protocols", p)),
        );
        for (field, value) in web_protocols {
            if Protocol::from(value.as_str()).is_unknown() {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownProtocol {
                        field: field.to_string(),
                        value: value.clone(),
                    },
                    format!("{}: unknown protocol '{}'", field, value),
                ));
            }
        }

        issues
    }

    /// Enabled `[[models]]` entries, in schedule order
    pub fn enabled_models(&self) -> impl Iterator<Item = &FileModelConfig> {
        self.models.iter().filter(|m| m.enabled)
    }
}
