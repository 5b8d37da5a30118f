//! Model registry entries from TOML (`[[models]]` array)

use crate::http::{HttpModelClient, default_url};
use multillm_domain::{ConfigIssue, ConfigIssueCode, ProviderKind, TextField};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One `[[models]]` entry
///
/// Only `name` is required; everything else falls back to the defaults of
/// the entry's `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    /// Unique name, also used in `[judges]`
    pub name: String,
    /// Provider kind (`openai`, `anthropic`, `gemini`, `ollama`, `custom`)
    pub kind: String,
    /// Model id sent to the provider
    pub model: Option<String>,
    /// Endpoint URL; required for `custom`
    pub url: Option<String>,
    /// Environment variable holding the API key; `""` disables auth
    pub api_key_env: Option<String>,
    /// Where the answer lives in the response body
    pub text_field: Option<String>,
    /// Whether the model answers prompts (judging is configured separately)
    pub enabled: bool,
    pub max_tokens: Option<u32>,
    /// Request body for `custom` kinds; `{prompt}` inside strings is replaced
    pub template: Option<Value>,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: ProviderKind::default().as_str().to_string(),
            model: None,
            url: None,
            api_key_env: None,
            text_field: None,
            enabled: true,
            max_tokens: None,
            template: None,
        }
    }
}

impl FileModelConfig {
    /// Parse `kind`, reporting unknown names
    pub fn parse_kind(&self) -> (Option<ProviderKind>, Vec<ConfigIssue>) {
        match self.kind.parse::<ProviderKind>() {
            Ok(kind) => (Some(kind), vec![]),
            Err(_) => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::UnknownProviderKind {
                        model: self.name.clone(),
                        kind: self.kind.clone(),
                    },
                    format!(
                        "models.{}.kind: unknown provider '{}' (expected one of: {})",
                        self.name,
                        self.kind,
                        ProviderKind::all().map(|k| k.as_str()).join(", ")
                    ),
                )],
            ),
        }
    }

    /// Parse `text_field`, or the kind's default when unset
    pub fn parse_text_field(&self, kind: ProviderKind) -> (Option<TextField>, Vec<ConfigIssue>) {
        let selector = self
            .text_field
            .as_deref()
            .unwrap_or(kind.default_text_field());
        match selector.parse::<TextField>() {
            Ok(field) => (Some(field), vec![]),
            Err(e) => (
                None,
                vec![ConfigIssue::error(
                    ConfigIssueCode::InvalidTextField {
                        model: self.name.clone(),
                        selector: selector.to_string(),
                    },
                    format!("models.{}.text_field: {}", self.name, e),
                )],
            ),
        }
    }

    /// Environment variable to read the API key from, if any
    pub fn api_key_env(&self, kind: ProviderKind) -> Option<String> {
        match self.api_key_env.as_deref() {
            Some("") => None,
            Some(env) => Some(env.to_string()),
            None => kind.default_api_key_env().map(str::to_string),
        }
    }

    /// Build the HTTP client for this entry
    ///
    /// Returns `None` when an error issue prevents building. A missing API key
    /// is only a warning: the request goes out without auth and fails at the
    /// transport level.
    pub fn build_client(&self) -> (Option<HttpModelClient>, Vec<ConfigIssue>) {
        let (kind, mut issues) = self.parse_kind();
        let Some(kind) = kind else {
            return (None, issues);
        };

        let (field, field_issues) = self.parse_text_field(kind);
        issues.extend(field_issues);

        let mut client = HttpModelClient::new(&self.name, kind);
        if let Some(model) = &self.model {
            client = client.with_model(model);
        }
        match &self.url {
            Some(url) => client = client.with_url(url),
            None if default_url(kind, client.model()).is_none() => {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::MissingUrl {
                        model: self.name.clone(),
                    },
                    format!("models.{}.url: required for kind '{}'", self.name, kind.as_str()),
                ));
            }
            None => {}
        }

        if let Some(env) = self.api_key_env(kind) {
            match std::env::var(&env) {
                Ok(key) if !key.is_empty() => client = client.with_api_key(&key),
                _ => issues.push(ConfigIssue::warning(
                    ConfigIssueCode::MissingApiKey {
                        model: self.name.clone(),
                        env: env.clone(),
                    },
                    format!("models.{}: environment variable {} is not set", self.name, env),
                )),
            }
        }

        if let Some(max_tokens) = self.max_tokens {
            client = client.with_max_tokens(max_tokens);
        }
        if let Some(template) = &self.template {
            client = client.with_template(template.clone());
        }

        let buildable = field.is_some() && !issues.iter().any(ConfigIssue::is_error);
        match field {
            Some(field) if buildable => (Some(client.with_text_field(field)), issues),
            _ => (None, issues),
        }
    }
}
