//! Core data model types for jobber.
//!
//! The input records (question sets and applications) mirror what the
//! surrounding application stores. The scored types are derived values built
//! once per scoring call and never updated afterwards.

use serde::{Deserialize, Serialize};

use crate::aggregate::RatioSet;

/// A screening question with its canonical answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier referenced by applicant responses.
    pub id: String,
    /// The question text shown to applicants.
    #[serde(default)]
    pub question: String,
    /// Reference answer, or the wildcard `"any"`.
    pub answer: String,
}

/// A collection of screening questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSet {
    /// Unique identifier for this question set.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of the position or screening round.
    #[serde(default)]
    pub description: String,
    /// The questions, in display order.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl QuestionSet {
    /// Look up a question by id. The first match wins on duplicates.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

/// One applicant's answer to one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantResponse {
    /// Question identifier.
    pub id: String,
    /// Free-text answer.
    #[serde(default)]
    pub answer: String,
}

impl ApplicantResponse {
    pub fn new(id: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            answer: answer.into(),
        }
    }
}

/// A submitted job application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    /// Unique identifier for this application.
    pub id: String,
    /// Applicant name.
    #[serde(default)]
    pub name: String,
    /// Answers, in submission order.
    #[serde(default, alias = "applicant_responses")]
    pub responses: Vec<ApplicantResponse>,
}

/// A response after scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResponse {
    /// Question identifier.
    pub id: String,
    /// The applicant's answer.
    pub answer: String,
    /// Similarity to the canonical answer under every metric.
    pub ratios: RatioSet,
    /// Whether every canonical token appears in the answer.
    pub contained: bool,
    /// Outcome of the pass/fail rule.
    pub passed: bool,
}

/// All scored responses of an application plus the overall verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredApplication {
    /// Scored responses, in input order.
    pub responses: Vec<ScoredResponse>,
    /// `true` iff every response passed.
    pub accepted: bool,
}

impl ScoredApplication {
    /// Roll up scored responses into a verdict.
    pub fn from_responses(responses: Vec<ScoredResponse>) -> Self {
        let accepted = responses.iter().all(|r| r.passed);
        Self {
            responses,
            accepted,
        }
    }

    /// Number of responses that passed.
    pub fn passed_count(&self) -> usize {
        self.responses.iter().filter(|r| r.passed).count()
    }

    /// Responses that failed the pass/fail rule.
    pub fn failed_responses(&self) -> impl Iterator<Item = &ScoredResponse> {
        self.responses.iter().filter(|r| !r.passed)
    }
}
