//! Judge-facing comparison prompt

use crate::comparison::pair::ComparisonPair;
use crate::comparison::verdict::{AGREE_TOKEN, DISAGREE_TOKEN};

/// Template that turns a [`ComparisonPair`] into a YES/NO question for a judge
pub struct ComparisonTemplate;

impl ComparisonTemplate {
    /// Build the equivalence question sent to a judge model
    pub fn make_comparison(pair: &ComparisonPair) -> String {
        format!(
            r#"Two people were given the same question and answered it independently.

The question was:
{prompt}

{label_a} answered:
{text_a}

{label_b} answered:
{text_b}

Do {label_a} and {label_b} give essentially the same answer? Ignore differences in wording, \
formatting and level of detail; only a difference in substance counts.
Reply with the single word {agree} if the answers are equivalent, or {disagree} if they are not."#,
            prompt = pair.prompt,
            label_a = pair.label_a,
            text_a = pair.text_a,
            label_b = pair.label_b,
            text_b = pair.text_b,
            agree = AGREE_TOKEN,
            disagree = DISAGREE_TOKEN,
        )
    }
}
