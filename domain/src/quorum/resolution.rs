//! Quorum resolution from an agreement graph

use super::graph::AgreementGraph;
use serde::{Deserialize, Serialize};

/// How large the leading quorum is relative to all enabled models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuorumOutcome {
    /// Quorum size equals the number of enabled models
    Consensus,
    /// Quorum size exceeds half of the enabled models
    Majority,
    /// Exactly two models agree, short of a majority
    TwoAgree,
    /// A quorum larger than two that still falls short of a majority
    Minority,
    /// No pair agreed
    NoAgreement,
}

impl QuorumOutcome {
    /// Whether this outcome carries a winning answer
    pub fn is_decisive(&self) -> bool {
        matches!(self, QuorumOutcome::Consensus | QuorumOutcome::Majority)
    }
}

impl std::fmt::Display for QuorumOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuorumOutcome::Consensus => write!(f, "Consensus"),
            QuorumOutcome::Majority => write!(f, "Majority"),
            QuorumOutcome::TwoAgree => write!(f, "Two agree"),
            QuorumOutcome::Minority => write!(f, "Minority"),
            QuorumOutcome::NoAgreement => write!(f, "No agreement"),
        }
    }
}

/// Result of resolving the quorum over an [`AgreementGraph`]
///
/// # Example
///
/// ```
/// use multillm_domain::quorum::{AgreementGraph, QuorumOutcome, QuorumResolution};
///
/// let mut graph = AgreementGraph::new(vec![
///     "model1".into(), "model2".into(), "model3".into(), "model4".into(),
/// ]);
/// graph.add_agreement(0, 1);
/// graph.add_agreement(0, 2);
///
/// let resolution = QuorumResolution::resolve(&graph);
/// assert_eq!(resolution.outcome, QuorumOutcome::Majority);
/// assert_eq!(resolution.quorum_size, 3);
/// assert_eq!(resolution.winner(), Some(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuorumResolution {
    /// Position of the quorum leader in the enabled-model order
    pub leader: Option<usize>,
    /// Positions agreeing with the leader
    pub members: Vec<usize>,
    /// Leader's neighbor count plus the leader itself; 0 without a leader
    pub quorum_size: usize,
    /// Number of enabled models
    pub total: usize,
    pub outcome: QuorumOutcome,
}

impl QuorumResolution {
    pub fn resolve(graph: &AgreementGraph) -> Self {
        let total = graph.model_count();
        let Some(leader) = graph.leader() else {
            return Self {
                leader: None,
                members: Vec::new(),
                quorum_size: 0,
                total,
                outcome: QuorumOutcome::NoAgreement,
            };
        };

        let members = graph.neighbors(leader).to_vec();
        let quorum_size = members.len() + 1;

        let outcome = if quorum_size == total {
            QuorumOutcome::Consensus
        } else if quorum_size * 2 > total {
            QuorumOutcome::Majority
        } else if quorum_size == 2 {
            QuorumOutcome::TwoAgree
        } else {
            QuorumOutcome::Minority
        };

        Self {
            leader: Some(leader),
            members,
            quorum_size,
            total,
            outcome,
        }
    }

    /// Position whose answer should be returned, if the quorum is decisive
    pub fn winner(&self) -> Option<usize> {
        if self.outcome.is_decisive() {
            self.leader
        } else {
            None
        }
    }
}
