//! Core domain concepts shared across all subdomains.
//!
//! - [`provider::ProviderKind`]: the wire dialect a configured model speaks
//! - [`prompt::Prompt`]: a validated prompt to fan out to the models
//! - [`selector::TextField`]: where the answer text lives in a response body
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod prompt;
pub mod provider;
pub mod selector;
