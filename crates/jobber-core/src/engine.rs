//! Batch scoring orchestrator.
//!
//! Scores many applications against one question set in parallel. Each
//! application runs on tokio's blocking pool, bounded by a semaphore, and the
//! verdicts are reassembled in input order once every task has finished.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use futures::stream::{FuturesUnordered, StreamExt};
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::model::{Application, QuestionSet};
use crate::report::{ApplicationVerdict, QuestionSetSummary, ScoreReport, ScoringFailure};
use crate::scorer::ApplicationScorer;
use crate::statistics::compute_batch_stats;

/// Configuration for the scoring engine.
#[derive(Debug, Clone)]
pub struct ScoringEngineConfig {
    /// Maximum applications scored concurrently.
    pub parallelism: usize,
}

impl Default for ScoringEngineConfig {
    fn default() -> Self {
        Self { parallelism: 4 }
    }
}

/// Progress reporting trait.
pub trait ProgressReporter: Send + Sync {
    fn on_application_complete(&self, verdict: &ApplicationVerdict);
    fn on_application_error(&self, application_id: &str, error: &str);
    fn on_batch_complete(&self, total: usize, accepted: usize, failed: usize, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_application_complete(&self, _: &ApplicationVerdict) {}
    fn on_application_error(&self, _: &str, _: &str) {}
    fn on_batch_complete(&self, _: usize, _: usize, _: usize, _: Duration) {}
}

/// The batch scoring engine.
pub struct ScoringEngine {
    questions: Arc<QuestionSet>,
    scorer: Arc<ApplicationScorer<Arc<QuestionSet>>>,
    config: ScoringEngineConfig,
}

impl ScoringEngine {
    pub fn new(questions: QuestionSet, config: ScoringEngineConfig) -> Self {
        let questions = Arc::new(questions);
        let scorer = Arc::new(ApplicationScorer::new(Arc::clone(&questions)));
        Self {
            questions,
            scorer,
            config,
        }
    }

    /// The question set used as the answer key.
    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    /// Score every application and build a report.
    ///
    /// Applications referencing unknown questions end up in
    /// `ScoreReport::failures`; the rest are unaffected.
    pub async fn run(
        &self,
        applications: Vec<Application>,
        progress: &dyn ProgressReporter,
    ) -> Result<ScoreReport> {
        let start = Instant::now();
        let run_id = Uuid::new_v4();
        let semaphore = Arc::new(Semaphore::new(self.config.parallelism.max(1)));
        let total = applications.len();

        tracing::info!(
            question_set = %self.questions.id,
            applications = total,
            parallelism = self.config.parallelism,
            "scoring batch"
        );

        let mut futures = FuturesUnordered::new();

        for (index, application) in applications.into_iter().enumerate() {
            let scorer = Arc::clone(&self.scorer);
            let semaphore = Arc::clone(&semaphore);

            futures.push(async move {
                let application_id = application.id.clone();
                let inner = async move {
                    let _permit = semaphore
                        .acquire_owned()
                        .await
                        .map_err(|_| anyhow::anyhow!("semaphore closed"))?;

                    let outcome = tokio::task::spawn_blocking(move || {
                        scorer
                            .score_application(&application)
                            .map(|scored| ApplicationVerdict {
                                application_id: application.id,
                                applicant_name: application.name,
                                scored,
                            })
                    })
                    .await
                    .context("scoring task failed")?;
                    Ok::<_, anyhow::Error>(outcome)
                };
                (index, application_id, inner.await)
            });
        }

        let mut outcomes = Vec::with_capacity(total);
        let mut accepted = 0usize;
        let mut failed = 0usize;

        while let Some((index, application_id, result)) = futures.next().await {
            let outcome = result
                .with_context(|| format!("failed to score application {application_id}"))?;
            match &outcome {
                Ok(verdict) => {
                    progress.on_application_complete(verdict);
                    accepted += usize::from(verdict.scored.accepted);
                }
                Err(e) => {
                    tracing::error!("scoring failed for {application_id}: {e}");
                    progress.on_application_error(&application_id, &e.to_string());
                    failed += 1;
                }
            }
            outcomes.push((index, application_id, outcome));
        }

        let elapsed = start.elapsed();
        progress.on_batch_complete(total, accepted, failed, elapsed);

        // Completion order is arbitrary; restore submission order.
        outcomes.sort_by_key(|(index, _, _)| *index);

        let mut verdicts = Vec::with_capacity(total - failed);
        let mut failures = Vec::with_capacity(failed);
        for (_, application_id, outcome) in outcomes {
            match outcome {
                Ok(verdict) => verdicts.push(verdict),
                Err(e) => failures.push(ScoringFailure {
                    application_id,
                    question_id: e.question_id().to_string(),
                    error: e.to_string(),
                }),
            }
        }

        let stats = compute_batch_stats(&verdicts, failures.len());

        tracing::info!(
            accepted = stats.accepted,
            rejected = stats.rejected,
            failed = stats.failed,
            elapsed_ms = elapsed.as_millis() as u64,
            "batch scored"
        );

        Ok(ScoreReport {
            id: run_id,
            created_at: chrono::Utc::now(),
            question_set: QuestionSetSummary::from(self.questions.as_ref()),
            verdicts,
            failures,
            stats,
            duration_ms: elapsed.as_millis() as u64,
        })
    }
}
