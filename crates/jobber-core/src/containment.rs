//! Whole-token containment check.

use crate::tokenize::{split_tokens, tokenize};

/// Returns `true` if every lowercased token of `canonical` appears verbatim
/// among the space-separated tokens of `applicant`.
///
/// Tokens are compared by exact equality, never as substrings. Applicant
/// tokens keep their original case. An empty canonical answer is trivially
/// contained.
pub fn contains_all_tokens(applicant: &str, canonical: &str) -> bool {
    let applicant_tokens = split_tokens(applicant);
    tokenize(canonical)
        .iter()
        .all(|token| applicant_tokens.contains(&token.as_str()))
}
