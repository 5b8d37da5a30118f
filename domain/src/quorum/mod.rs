//! Quorum resolution domain
//!
//! Used by the all-pairs (`n-way`) protocol. Every pair of enabled models is
//! judged; agreeing pairs become edges of an [`AgreementGraph`], and the model
//! with the most agreements leads the quorum.
//!
//! ```text
//!   gpt ──── claude          leader: gpt (2 neighbors)
//!    │                       quorum size: 3 of 4
//!    └────── gemini          outcome: majority → gpt's answer wins
//!
//!   mistral
//! ```

pub mod graph;
pub mod resolution;

pub use graph::{AgreementGraph, all_pairs};
pub use resolution::{QuorumOutcome, QuorumResolution};
