//! Aggregate statistics over a scored batch.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::report::ApplicationVerdict;

/// Batch-wide totals and per-question breakdown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchStats {
    /// Applications submitted, including ones that failed to score.
    pub total_applications: usize,
    pub accepted: usize,
    pub rejected: usize,
    /// Applications that could not be scored.
    pub failed: usize,
    /// Accepted share of the scored applications.
    pub acceptance_rate: f64,
    /// Per-question statistics keyed by question id.
    pub per_question: BTreeMap<String, QuestionStats>,
}

/// How applicants fared on a single question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionStats {
    pub question_id: String,
    /// Responses to this question across scored applications.
    pub answered: usize,
    pub passed: usize,
    /// Responses whose answer contained every canonical token.
    pub contained: usize,
    pub pass_rate: f64,
    /// Mean of the per-response metric averages.
    pub mean_average_ratio: f64,
}

/// `part / whole`, or 0.0 for an empty whole.
pub fn rate(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Compute statistics for scored verdicts plus `failed` unscored applications.
pub fn compute_batch_stats(verdicts: &[ApplicationVerdict], failed: usize) -> BatchStats {
    let accepted = verdicts.iter().filter(|v| v.scored.accepted).count();
    let rejected = verdicts.len() - accepted;

    let mut ratio_sums: BTreeMap<String, f64> = BTreeMap::new();
    let mut per_question: BTreeMap<String, QuestionStats> = BTreeMap::new();
    for response in verdicts.iter().flat_map(|v| &v.scored.responses) {
        let stats = per_question
            .entry(response.id.clone())
            .or_insert_with(|| QuestionStats {
                question_id: response.id.clone(),
                answered: 0,
                passed: 0,
                contained: 0,
                pass_rate: 0.0,
                mean_average_ratio: 0.0,
            });
        stats.answered += 1;
        stats.passed += usize::from(response.passed);
        stats.contained += usize::from(response.contained);
        *ratio_sums.entry(response.id.clone()).or_default() += response.ratios.average;
    }

    for (id, stats) in per_question.iter_mut() {
        stats.pass_rate = rate(stats.passed, stats.answered);
        let sum = ratio_sums.get(id).copied().unwrap_or(0.0);
        stats.mean_average_ratio = if stats.answered == 0 {
            0.0
        } else {
            sum / stats.answered as f64
        };
    }

    BatchStats {
        total_applications: verdicts.len() + failed,
        accepted,
        rejected,
        failed,
        acceptance_rate: rate(accepted, verdicts.len()),
        per_question,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::RatioSet;
    use crate::model::{ScoredApplication, ScoredResponse};

    fn response(id: &str, passed: bool, average_of: u8) -> ScoredResponse {
        ScoredResponse {
            id: id.into(),
            answer: String::new(),
            ratios: RatioSet::from_scores([average_of; 6]),
            contained: passed,
            passed,
        }
    }

    fn verdict(id: &str, responses: Vec<ScoredResponse>) -> ApplicationVerdict {
        ApplicationVerdict {
            application_id: id.into(),
            applicant_name: String::new(),
            scored: ScoredApplication::from_responses(responses),
        }
    }

    #[test]
    fn totals_and_rates() {
        let verdicts = vec![
            verdict("a", vec![response("q1", true, 100), response("q2", true, 90)]),
            verdict("b", vec![response("q1", false, 40), response("q2", true, 80)]),
        ];
        let stats = compute_batch_stats(&verdicts, 1);

        assert_eq!(stats.total_applications, 3);
        assert_eq!(stats.accepted, 1);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.failed, 1);
        assert!((stats.acceptance_rate - 0.5).abs() < f64::EPSILON);

        let q1 = &stats.per_question["q1"];
        assert_eq!(q1.answered, 2);
        assert_eq!(q1.passed, 1);
        assert_eq!(q1.contained, 1);
        assert!((q1.pass_rate - 0.5).abs() < f64::EPSILON);
        assert!((q1.mean_average_ratio - 70.0).abs() < 1e-9);

        let q2 = &stats.per_question["q2"];
        assert!((q2.pass_rate - 1.0).abs() < f64::EPSILON);
        assert!((q2.mean_average_ratio - 85.0).abs() < 1e-9);
    }

    #[test]
    fn empty_batch() {
        let stats = compute_batch_stats(&[], 0);
        assert_eq!(stats.total_applications, 0);
        assert_eq!(stats.acceptance_rate, 0.0);
        assert!(stats.per_question.is_empty());
    }
}
