//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No models enabled for comparison")]
    NoModels,

    #[error("Invalid prompt: {0}")]
    InvalidPrompt(String),

    #[error("Invalid text field selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Unknown provider kind: {0}")]
    UnknownProviderKind(String),
}
