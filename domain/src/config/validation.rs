//! Configuration validation issues.
//!
//! Loaders check the model registry and judge list before a run starts and
//! report problems as structured [`ConfigIssue`]s instead of failing on the
//! first one.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A `[[models]]` entry has an empty name.
    EmptyModelName,
    /// Two `[[models]]` entries share a name.
    DuplicateModelName { name: String },
    /// A `kind` names no supported provider.
    UnknownProviderKind { model: String, kind: String },
    /// A model has no `url` and its kind has no default endpoint.
    MissingUrl { model: String },
    /// A `text_field` selector does not parse.
    InvalidTextField { model: String, selector: String },
    /// A judge refers to a model that is not configured.
    UnknownJudge { name: String },
    /// No judge models are configured.
    NoJudges,
    /// Fewer than two models are enabled, so nothing can be compared.
    TooFewEnabledModels { enabled: usize },
    /// A model's API key environment variable is not set.
    MissingApiKey { model: String, env: String },
    /// A protocol name is not recognized.
    UnknownProtocol { field: String, value: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", level, self.message)
    }
}
