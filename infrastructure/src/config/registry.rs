//! Model registry built from the file configuration

use super::file_config::FileConfig;
use crate::http::HttpModelClient;
use multillm_application::{BehaviorConfig, CompareConfig, SharedModelClient};
use multillm_domain::{ConfigIssue, ProviderKind};
use std::sync::Arc;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("invalid configuration: {}", summarize(.0))]
    Invalid(Vec<ConfigIssue>),

    #[error("judge '{0}' is not a configured model")]
    UnknownJudge(String),
}

fn summarize(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A registered model
#[derive(Debug, Clone)]
pub struct ModelEntry {
    pub name: String,
    pub kind: ProviderKind,
    pub model: String,
    pub enabled: bool,
    pub client: Arc<HttpModelClient>,
}

/// Every configured model plus the judge list, resolved to clients
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    entries: Vec<ModelEntry>,
    judges: Vec<String>,
}

impl ModelRegistry {
    /// Build clients for every `[[models]]` entry
    ///
    /// Fails on the first entry that cannot be built; run
    /// [`FileConfig::validate`] beforehand to get every issue at once.
    pub fn from_config(config: &FileConfig) -> Result<Self, ConfigValidationError> {
        let mut entries = Vec::with_capacity(config.models.len());
        for model in &config.models {
            let (client, issues) = model.build_client();
            let Some(client) = client else {
                return Err(ConfigValidationError::Invalid(
                    issues.into_iter().filter(ConfigIssue::is_error).collect(),
                ));
            };
            entries.push(ModelEntry {
                name: model.name.clone(),
                kind: client.kind(),
                model: client.model().to_string(),
                enabled: model.enabled,
                client: Arc::new(client),
            });
        }

        let registry = Self {
            entries,
            judges: config.judges.models.clone(),
        };
        if let Some(unknown) = registry.judges.iter().find(|j| registry.get(j).is_none()) {
            return Err(ConfigValidationError::UnknownJudge(unknown.clone()));
        }
        Ok(registry)
    }

    pub fn entries(&self) -> &[ModelEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&ModelEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn judges(&self) -> &[String] {
        &self.judges
    }

    pub fn is_judge(&self, name: &str) -> bool {
        self.judges.iter().any(|j| j == name)
    }

    /// Enable or disable a model for this process only
    pub fn set_enabled(&mut self, name: &str, enabled: bool) -> bool {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => {
                entry.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Snapshot for the comparison use case: enabled models and judges, in order
    pub fn compare_config(&self, behavior: BehaviorConfig) -> CompareConfig {
        let models = self
            .entries
            .iter()
            .filter(|e| e.enabled)
            .map(|e| e.client.clone() as SharedModelClient)
            .collect();
        let judges = self
            .judges
            .iter()
            .filter_map(|name| self.get(name))
            .map(|e| e.client.clone() as SharedModelClient)
            .collect();
        CompareConfig::new(models, judges).with_behavior(behavior)
    }
}
