//! Comparison pair handed to a judge

use serde::{Deserialize, Serialize};

/// Name under which a candidate is presented to a judge
///
/// Judges only see these names, never which model wrote the answer, except in
/// the all-pairs protocol where the model is appended for readability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label(String);

impl Label {
    pub fn alice() -> Self {
        Self("Alice".to_string())
    }

    pub fn bob() -> Self {
        Self("Bob".to_string())
    }

    pub fn eve() -> Self {
        Self("Eve".to_string())
    }

    /// First member of an all-pairs comparison, e.g. `John (using gpt)`
    pub fn john(model: &str) -> Self {
        Self(format!("John (using {})", model))
    }

    /// Second member of an all-pairs comparison
    pub fn jane(model: &str) -> Self {
        Self(format!("Jane (using {})", model))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Two labeled candidate answers to the same prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonPair {
    pub prompt: String,
    pub label_a: Label,
    pub text_a: String,
    pub label_b: Label,
    pub text_b: String,
}

impl ComparisonPair {
    pub fn new(
        prompt: impl Into<String>,
        label_a: Label,
        text_a: impl Into<String>,
        label_b: Label,
        text_b: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            label_a,
            text_a: text_a.into(),
            label_b,
            text_b: text_b.into(),
        }
    }

    /// Short description such as `Alice and Bob`
    pub fn title(&self) -> String {
        format!("{} and {}", self.label_a, self.label_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_pairs_labels() {
        assert_eq!(Label::john("gpt").as_str(), "John (using gpt)");
        assert_eq!(Label::jane("claude").as_str(), "Jane (using claude)");
    }

    #[test]
    fn test_title() {
        let pair = ComparisonPair::new("q", Label::alice(), "a", Label::eve(), "b");
        assert_eq!(pair.title(), "Alice and Eve");
    }
}
