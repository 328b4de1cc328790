//! The fuzzy ratio family.
//!
//! Every metric maps a pair of strings to an integer similarity in `0..=100`,
//! where 100 means identical under that metric's definition. All of them are
//! built on [`simple_ratio`], a Levenshtein distance normalized by the
//! combined length of both inputs.
//!
//! Lengths are counted in `char`s, so multi-byte text is compared per
//! character rather than per byte.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::tokenize::tokenize;

/// Common interface for a similarity metric.
pub trait Similarity: Send + Sync {
    /// Stable metric name (e.g. "token_set").
    fn name(&self) -> &str;

    /// Similarity of `a` and `b` in `0..=100`.
    fn similarity(&self, a: &str, b: &str) -> u8;
}

/// The six built-in metrics, in aggregation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Simple,
    TokenSort,
    TokenSet,
    Partial,
    PartialTokenSort,
    PartialTokenSet,
}

impl Metric {
    /// All metrics, in the order their results appear in a `RatioSet`.
    pub const ALL: [Metric; 6] = [
        Metric::Simple,
        Metric::TokenSort,
        Metric::TokenSet,
        Metric::Partial,
        Metric::PartialTokenSort,
        Metric::PartialTokenSet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Simple => "simple",
            Metric::TokenSort => "token_sort",
            Metric::TokenSet => "token_set",
            Metric::Partial => "partial",
            Metric::PartialTokenSort => "partial_token_sort",
            Metric::PartialTokenSet => "partial_token_set",
        }
    }

    /// Run this metric on a pair of strings.
    pub fn compute(self, a: &str, b: &str) -> u8 {
        match self {
            Metric::Simple => simple_ratio(a, b),
            Metric::TokenSort => token_sort_ratio(a, b),
            Metric::TokenSet => token_set_ratio(a, b),
            Metric::Partial => partial_ratio(a, b),
            Metric::PartialTokenSort => partial_token_sort_ratio(a, b),
            Metric::PartialTokenSet => partial_token_set_ratio(a, b),
        }
    }
}

impl Similarity for Metric {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn similarity(&self, a: &str, b: &str) -> u8 {
        self.compute(a, b)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "simple" | "ratio" => Ok(Metric::Simple),
            "token_sort" => Ok(Metric::TokenSort),
            "token_set" => Ok(Metric::TokenSet),
            "partial" => Ok(Metric::Partial),
            "partial_token_sort" => Ok(Metric::PartialTokenSort),
            "partial_token_set" => Ok(Metric::PartialTokenSet),
            other => Err(format!("unknown metric: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Edit-distance primitive
// ---------------------------------------------------------------------------

/// Levenshtein distance with unit-cost insert, delete and substitute.
fn edit_distance(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1)
                .min(curr[j] + 1)
                .min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

fn ratio_chars(a: &[char], b: &[char]) -> u8 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100;
    }
    let distance = edit_distance(a, b);
    // 100 * (total - distance) / total, rounded half up in integer arithmetic
    ((200 * (total - distance) + total) / (2 * total)) as u8
}

/// Best ratio of the shorter input against every same-length window of the
/// longer one. On equal lengths `a` is treated as the shorter input.
fn partial_chars(a: &[char], b: &[char]) -> u8 {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return if long.is_empty() { 100 } else { 0 };
    }

    let mut best = 0;
    for window in long.windows(short.len()) {
        best = best.max(ratio_chars(short, window));
        if best == 100 {
            break;
        }
    }
    best
}

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

// ---------------------------------------------------------------------------
// Token reductions
// ---------------------------------------------------------------------------

fn sorted_tokens(text: &str) -> String {
    let mut tokens = tokenize(text);
    tokens.sort();
    tokens.join(" ")
}

/// The three strings compared by the token-set metrics.
struct TokenSetPairs {
    intersection: String,
    with_a: String,
    with_b: String,
    blank_a: bool,
    blank_b: bool,
}

impl TokenSetPairs {
    fn new(a: &str, b: &str) -> Self {
        let set_a: BTreeSet<String> = tokenize(a).into_iter().collect();
        let set_b: BTreeSet<String> = tokenize(b).into_iter().collect();

        let intersection = join_sorted(set_a.intersection(&set_b));
        let diff_a = join_sorted(set_a.difference(&set_b));
        let diff_b = join_sorted(set_b.difference(&set_a));

        Self {
            with_a: join_nonempty(&intersection, &diff_a),
            with_b: join_nonempty(&intersection, &diff_b),
            intersection,
            blank_a: is_blank(&set_a),
            blank_b: is_blank(&set_b),
        }
    }

    /// A side without any non-empty token only matches another such side.
    fn best_by(&self, ratio: impl Fn(&str, &str) -> u8) -> u8 {
        match (self.blank_a, self.blank_b) {
            (true, true) => 100,
            (true, false) | (false, true) => 0,
            (false, false) => ratio(&self.intersection, &self.with_a)
                .max(ratio(&self.intersection, &self.with_b))
                .max(ratio(&self.with_a, &self.with_b)),
        }
    }
}

fn is_blank(tokens: &BTreeSet<String>) -> bool {
    tokens.iter().all(String::is_empty)
}

fn join_sorted<'a>(tokens: impl Iterator<Item = &'a String>) -> String {
    tokens.map(String::as_str).collect::<Vec<_>>().join(" ")
}

fn join_nonempty(head: &str, tail: &str) -> String {
    match (head.is_empty(), tail.is_empty()) {
        (true, _) => tail.to_string(),
        (_, true) => head.to_string(),
        _ => format!("{head} {tail}"),
    }
}

// ---------------------------------------------------------------------------
// Public metrics
// ---------------------------------------------------------------------------

/// Normalized edit-distance similarity:
/// `100 * (1 - distance / (len(a) + len(b)))`, rounded.
///
/// Two empty strings score 100.
pub fn simple_ratio(a: &str, b: &str) -> u8 {
    ratio_chars(&chars(a), &chars(b))
}

/// [`simple_ratio`] after lowercasing, sorting and rejoining the tokens of
/// both strings. Insensitive to word order.
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    simple_ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Best [`simple_ratio`] over the intersection/difference pairings of the
/// deduplicated token sets of both strings.
pub fn token_set_ratio(a: &str, b: &str) -> u8 {
    TokenSetPairs::new(a, b).best_by(simple_ratio)
}

/// Best [`simple_ratio`] of the shorter string against every window of the
/// longer string with the same length.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    partial_chars(&chars(a), &chars(b))
}

/// [`partial_ratio`] over the sorted-token forms used by [`token_sort_ratio`].
pub fn partial_token_sort_ratio(a: &str, b: &str) -> u8 {
    partial_ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// [`partial_ratio`] over the pairings used by [`token_set_ratio`].
pub fn partial_token_set_ratio(a: &str, b: &str) -> u8 {
    TokenSetPairs::new(a, b).best_by(partial_ratio)
}
