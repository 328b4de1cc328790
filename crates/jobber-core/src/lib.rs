//! jobber-core — Fuzzy answer-scoring engine for job applications.
//!
//! This crate defines the similarity metrics, the per-response pass/fail rule
//! and the application-level accept/reject verdict, plus the loaders, batch
//! engine and reports built around them.

pub mod aggregate;
pub mod config;
pub mod containment;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod model;
pub mod parser;
pub mod report;
pub mod scorer;
pub mod statistics;
pub mod tokenize;

pub use aggregate::RatioSet;
pub use error::ScoringError;
pub use model::{
    Application, ApplicantResponse, Question, QuestionSet, ScoredApplication, ScoredResponse,
};
pub use scorer::{AnswerKey, ApplicationScorer};
