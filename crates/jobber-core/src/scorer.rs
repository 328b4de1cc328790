//! Per-response pass/fail rule and the application-level verdict.
//!
//! A response passes when its partial token-set ratio reaches
//! [`PASS_THRESHOLD`], or unconditionally when the canonical answer is the
//! wildcard [`WILDCARD_ANSWER`]. An application is accepted only if every
//! response passes.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::aggregate::RatioSet;
use crate::containment::contains_all_tokens;
use crate::error::ScoringError;
use crate::model::{ApplicantResponse, Application, QuestionSet, ScoredApplication, ScoredResponse};

/// Canonical answer marking a free-response question. Compared
/// case-insensitively.
pub const WILDCARD_ANSWER: &str = "any";

/// Minimum partial token-set ratio for a response to pass.
pub const PASS_THRESHOLD: u8 = 80;

// ---------------------------------------------------------------------------
// Answer key
// ---------------------------------------------------------------------------

/// Source of canonical answers, keyed by question id.
pub trait AnswerKey {
    /// The canonical answer for `question_id`, if the question exists.
    fn canonical_answer(&self, question_id: &str) -> Option<&str>;
}

impl AnswerKey for HashMap<String, String> {
    fn canonical_answer(&self, question_id: &str) -> Option<&str> {
        self.get(question_id).map(String::as_str)
    }
}

impl AnswerKey for BTreeMap<String, String> {
    fn canonical_answer(&self, question_id: &str) -> Option<&str> {
        self.get(question_id).map(String::as_str)
    }
}

impl AnswerKey for QuestionSet {
    fn canonical_answer(&self, question_id: &str) -> Option<&str> {
        self.question(question_id).map(|q| q.answer.as_str())
    }
}

impl<K: AnswerKey + ?Sized> AnswerKey for &K {
    fn canonical_answer(&self, question_id: &str) -> Option<&str> {
        (**self).canonical_answer(question_id)
    }
}

impl<K: AnswerKey + ?Sized> AnswerKey for Arc<K> {
    fn canonical_answer(&self, question_id: &str) -> Option<&str> {
        (**self).canonical_answer(question_id)
    }
}

// ---------------------------------------------------------------------------
// Decision rule
// ---------------------------------------------------------------------------

/// Whether `canonical` is the wildcard answer.
pub fn is_wildcard(canonical: &str) -> bool {
    canonical.eq_ignore_ascii_case(WILDCARD_ANSWER)
}

/// Apply the pass/fail rule to an already-computed ratio set.
pub fn passes(canonical: &str, ratios: &RatioSet) -> bool {
    is_wildcard(canonical) || ratios.partial_token_set >= PASS_THRESHOLD
}

/// Score a single response against its canonical answer.
pub fn score_response(response: &ApplicantResponse, canonical: &str) -> ScoredResponse {
    let ratios = RatioSet::compute(&response.answer, canonical);
    let contained = contains_all_tokens(&response.answer, canonical);
    let passed = passes(canonical, &ratios);

    tracing::debug!(
        question_id = %response.id,
        partial_token_set = ratios.partial_token_set,
        average = ratios.average,
        contained,
        passed,
        "scored response"
    );

    ScoredResponse {
        id: response.id.clone(),
        answer: response.answer.clone(),
        ratios,
        contained,
        passed,
    }
}

// ---------------------------------------------------------------------------
// Application scorer
// ---------------------------------------------------------------------------

/// Scores applications against an answer key.
///
/// Holds no mutable state; a single scorer can be shared across threads and
/// called any number of times.
#[derive(Debug, Clone)]
pub struct ApplicationScorer<K> {
    key: K,
}

impl<K: AnswerKey> ApplicationScorer<K> {
    pub fn new(key: K) -> Self {
        Self { key }
    }

    /// The answer key this scorer resolves questions against.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Score responses in order and roll them up into a verdict.
    ///
    /// Every question id is resolved before any scoring happens; an unknown
    /// id fails the whole call and nothing is returned for the other
    /// responses.
    pub fn score(&self, responses: &[ApplicantResponse]) -> Result<ScoredApplication, ScoringError> {
        let resolved = responses
            .iter()
            .enumerate()
            .map(|(position, response)| {
                self.key
                    .canonical_answer(&response.id)
                    .map(|canonical| (response, canonical))
                    .ok_or_else(|| ScoringError::UnknownQuestionId {
                        question_id: response.id.clone(),
                        position,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let scored = resolved
            .into_iter()
            .map(|(response, canonical)| score_response(response, canonical))
            .collect();

        Ok(ScoredApplication::from_responses(scored))
    }

    /// Score every response of `application`.
    pub fn score_application(
        &self,
        application: &Application,
    ) -> Result<ScoredApplication, ScoringError> {
        let scored = self.score(&application.responses)?;
        tracing::debug!(
            application_id = %application.id,
            responses = scored.responses.len(),
            accepted = scored.accepted,
            "scored application"
        );
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn ratios_with_partial_token_set(score: u8) -> RatioSet {
        RatioSet::from_scores([0, 0, 0, 0, 0, score])
    }

    #[test]
    fn threshold_boundary() {
        assert!(!passes("Paris", &ratios_with_partial_token_set(79)));
        assert!(passes("Paris", &ratios_with_partial_token_set(80)));
        assert!(passes("Paris", &ratios_with_partial_token_set(100)));
    }

    #[test]
    fn wildcard_any_casing() {
        for canonical in ["any", "ANY", "Any", "aNy"] {
            assert!(is_wildcard(canonical));
            assert!(passes(canonical, &ratios_with_partial_token_set(0)));
        }
        assert!(!is_wildcard("anything"));
        assert!(!is_wildcard(" any"));
    }

    #[test]
    fn wildcard_passes_empty_answer() {
        let scored = score_response(&ApplicantResponse::new("q", ""), "Any");
        assert!(scored.passed);
    }

    #[test]
    fn blank_answers_fail_concrete_questions() {
        for answer in ["", " ", "   "] {
            let scored = score_response(&ApplicantResponse::new("q", answer), "Paris");
            assert_eq!(scored.ratios.partial_token_set, 0, "{answer:?}");
            assert!(!scored.passed, "{answer:?}");
        }
    }

    #[test]
    fn all_blank_application_rejected() {
        let answers = key(&[("q1", "Paris"), ("q2", "Marie Curie")]);
        let result = ApplicationScorer::new(answers)
            .score(&[
                ApplicantResponse::new("q1", ""),
                ApplicantResponse::new("q2", " "),
            ])
            .unwrap();
        assert!(result.responses.iter().all(|r| !r.passed));
        assert!(!result.accepted);
    }

    #[test]
    fn empty_canonical_only_accepts_blank_answers() {
        assert!(score_response(&ApplicantResponse::new("q", ""), "").passed);
        assert!(score_response(&ApplicantResponse::new("q", " "), "").passed);
        assert!(!score_response(&ApplicantResponse::new("q", "totally unrelated"), "").passed);
    }

    #[test]
    fn single_question_accepted() {
        let answers = key(&[("q1", "Paris")]);
        let scorer = ApplicationScorer::new(&answers);
        let result = scorer
            .score(&[ApplicantResponse::new("q1", "paris")])
            .unwrap();
        assert!(result.responses[0].passed);
        assert!(result.accepted);
    }

    #[test]
    fn one_failure_rejects_application() {
        let answers = key(&[("q1", "Paris"), ("q2", "any")]);
        let scorer = ApplicationScorer::new(answers);
        let result = scorer
            .score(&[
                ApplicantResponse::new("q1", "London"),
                ApplicantResponse::new("q2", "whatever"),
            ])
            .unwrap();
        assert!(!result.responses[0].passed);
        assert!(result.responses[1].passed);
        assert!(!result.accepted);
    }

    #[test]
    fn preserves_input_order() {
        let answers = key(&[("a", "one"), ("b", "two"), ("c", "three")]);
        let scorer = ApplicationScorer::new(answers);
        let result = scorer
            .score(&[
                ApplicantResponse::new("c", "three"),
                ApplicantResponse::new("a", "one"),
                ApplicantResponse::new("b", "two"),
            ])
            .unwrap();
        let ids: Vec<&str> = result.responses.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn unknown_question_fails_whole_call() {
        let answers = key(&[("q1", "Paris")]);
        let scorer = ApplicationScorer::new(answers);
        let err = scorer
            .score(&[
                ApplicantResponse::new("q1", "Paris"),
                ApplicantResponse::new("q7", "?"),
            ])
            .unwrap_err();
        assert_eq!(
            err,
            ScoringError::UnknownQuestionId {
                question_id: "q7".into(),
                position: 1,
            }
        );
    }

    #[test]
    fn contained_is_diagnostic_only() {
        let answers = key(&[("q1", "blue whale")]);
        let scorer = ApplicationScorer::new(answers);
        let result = scorer
            .score(&[ApplicantResponse::new("q1", "the blue whale")])
            .unwrap();
        assert!(result.responses[0].contained);
        assert!(result.responses[0].passed);

        let result = scorer
            .score(&[ApplicantResponse::new("q1", "Blue Whale")])
            .unwrap();
        assert!(!result.responses[0].contained);
        assert!(result.responses[0].passed);
    }

    #[test]
    fn question_set_as_answer_key() {
        let set = QuestionSet {
            id: "set".into(),
            name: "Set".into(),
            description: String::new(),
            questions: vec![crate::model::Question {
                id: "q1".into(),
                question: "Capital of France?".into(),
                answer: "Paris".into(),
            }],
        };
        let scorer = ApplicationScorer::new(Arc::new(set));
        let app = Application {
            id: "app".into(),
            name: "Ada".into(),
            responses: vec![ApplicantResponse::new("q1", "It is Paris")],
        };
        assert!(scorer.score_application(&app).unwrap().accepted);
    }
}
