//! Comparison domain
//!
//! Value objects used while deciding whether independently generated answers
//! agree:
//!
//! - [`Protocol`]: which comparison strategy to run and how many models it queries
//! - [`Candidate`] / [`CandidateSet`]: extracted answer texts, positionally aligned with the queried models
//! - [`ComparisonPair`]: two labeled candidates handed to a judge
//! - [`verdict`]: reduction of a judge's free-text answer to a boolean

pub mod candidate;
pub mod pair;
pub mod protocol;
pub mod verdict;

pub use candidate::{Candidate, CandidateSet};
pub use pair::{ComparisonPair, Label};
pub use protocol::Protocol;
pub use verdict::verdict;
