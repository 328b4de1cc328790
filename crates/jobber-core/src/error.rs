//! Scoring error types.
//!
//! The engine itself has a single failure mode: a response that points at a
//! question the answer key does not know about. Empty strings are valid input
//! and never produce an error.

use thiserror::Error;

/// Errors that can occur while scoring an application.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    /// A response references a question id absent from the answer key.
    #[error("unknown question id '{question_id}' (response #{position})")]
    UnknownQuestionId {
        question_id: String,
        /// Zero-based index of the offending response.
        position: usize,
    },
}

impl ScoringError {
    /// The question id that caused the failure.
    pub fn question_id(&self) -> &str {
        match self {
            ScoringError::UnknownQuestionId { question_id, .. } => question_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_question_message() {
        let err = ScoringError::UnknownQuestionId {
            question_id: "q9".into(),
            position: 2,
        };
        assert_eq!(err.to_string(), "unknown question id 'q9' (response #2)");
        assert_eq!(err.question_id(), "q9");
    }
}
