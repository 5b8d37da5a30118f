//! Judge verdict rule
//!
//! A judge answers a YES/NO equivalence question in free text. The verdict is
//! a plain substring check: the text must contain `YES` and must not contain
//! `NO` anywhere, case-sensitive. Text such as "YES, though NOT exactly"
//! therefore reads as disagreement.

/// Token a judge uses to signal equivalent answers
pub const AGREE_TOKEN: &str = "YES";

/// Token a judge uses to signal different answers
pub const DISAGREE_TOKEN: &str = "NO";

/// Reduce a judge's answer to a boolean; a missing answer is a disagreement
pub fn verdict(judge_text: Option<&str>) -> bool {
    match judge_text {
        Some(text) => text.contains(AGREE_TOKEN) && !text.contains(DISAGREE_TOKEN),
        None => false,
    }
}
