//! Domain layer for multillm
//!
//! This crate contains the value objects and pure decision rules of the
//! comparison engine. It has no dependencies on network, configuration or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Candidates
//!
//! Every queried model yields exactly one [`Candidate`]. If its answer text
//! cannot be located with the model's [`TextField`], the candidate is blank
//! rather than missing, so positions always line up with the queried models.
//!
//! ## Verdicts
//!
//! A judge model is asked whether two labeled answers are equivalent. Its
//! free-text reply is reduced to a boolean by [`verdict`].
//!
//! ## Quorum
//!
//! The all-pairs protocol builds an [`AgreementGraph`] and resolves the
//! quorum led by the best-connected model ([`QuorumResolution`]).

pub mod comparison;
pub mod config;
pub mod core;
pub mod prompt;
pub mod quorum;
pub mod trail;

// Re-export commonly used types
pub use comparison::{Candidate, CandidateSet, ComparisonPair, Label, Protocol, verdict};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{
    error::DomainError,
    prompt::Prompt,
    provider::ProviderKind,
    selector::{PathSegment, TextField},
};
pub use prompt::ComparisonTemplate;
pub use quorum::{AgreementGraph, QuorumOutcome, QuorumResolution, all_pairs};
pub use trail::AuditTrail;
