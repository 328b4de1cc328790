//! Runs every metric on an answer pair and collects the results.

use serde::{Deserialize, Serialize};

use crate::metrics::{Metric, Similarity};

/// The metric list the aggregator runs, in `RatioSet` field order.
const METRICS: [Metric; 6] = Metric::ALL;

/// Scores from all six metrics for one applicant answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioSet {
    pub simple: u8,
    pub token_sort: u8,
    pub token_set: u8,
    pub partial: u8,
    pub partial_token_sort: u8,
    pub partial_token_set: u8,
    /// Arithmetic mean of the six ratios, not rounded.
    pub average: f64,
}

impl RatioSet {
    /// Score `applicant` against `canonical` with every metric.
    pub fn compute(applicant: &str, canonical: &str) -> Self {
        Self::from_scores(METRICS.map(|metric| metric.similarity(applicant, canonical)))
    }

    /// Build a set from scores given in [`Metric::ALL`] order.
    pub fn from_scores(scores: [u8; 6]) -> Self {
        let average = scores.iter().map(|&s| f64::from(s)).sum::<f64>() / scores.len() as f64;
        let [simple, token_sort, token_set, partial, partial_token_sort, partial_token_set] =
            scores;
        Self {
            simple,
            token_sort,
            token_set,
            partial,
            partial_token_sort,
            partial_token_set,
            average,
        }
    }

    /// Score for a single metric.
    pub fn get(&self, metric: Metric) -> u8 {
        match metric {
            Metric::Simple => self.simple,
            Metric::TokenSort => self.token_sort,
            Metric::TokenSet => self.token_set,
            Metric::Partial => self.partial,
            Metric::PartialTokenSort => self.partial_token_sort,
            Metric::PartialTokenSet => self.partial_token_set,
        }
    }

    /// `(metric, score)` pairs in aggregation order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, u8)> + '_ {
        METRICS.into_iter().map(move |metric| (metric, self.get(metric)))
    }
}
