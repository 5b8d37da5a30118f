//! Candidate answers

use serde::{Deserialize, Serialize};

/// Answer text extracted from one model's response
///
/// An extraction miss is represented by an empty `text`, never by a gap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Name of the model that produced the answer
    pub model: String,
    /// Extracted text, `""` when nothing usable was found
    pub text: String,
}

impl Candidate {
    pub fn new(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            text: text.into(),
        }
    }

    /// Placeholder for a response whose text could not be extracted
    pub fn missing(model: impl Into<String>) -> Self {
        Self::new(model, "")
    }

    /// Whether this candidate carries no usable text
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Ordered answers, one per queried model, in schedule order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateSet {
    candidates: Vec<Candidate>,
}

impl CandidateSet {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.candidates.iter()
    }

    /// Candidates that carry text, keeping their relative order
    pub fn non_blank(&self) -> Vec<&Candidate> {
        self.candidates.iter().filter(|c| !c.is_blank()).collect()
    }

    /// Texts in schedule order, blanks included
    pub fn texts(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.text.as_str()).collect()
    }

    pub fn push(&mut self, candidate: Candidate) {
        self.candidates.push(candidate);
    }

    pub fn into_inner(self) -> Vec<Candidate> {
        self.candidates
    }
}

impl FromIterator<Candidate> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = Candidate>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
