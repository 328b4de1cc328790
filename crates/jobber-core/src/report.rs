//! Score report types with JSON persistence and verdict comparison.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{QuestionSet, ScoredApplication};
use crate::statistics::BatchStats;

/// A complete batch scoring report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the question set used as the answer key.
    pub question_set: QuestionSetSummary,
    /// Scored applications, in input order.
    pub verdicts: Vec<ApplicationVerdict>,
    /// Applications that could not be scored.
    #[serde(default)]
    pub failures: Vec<ScoringFailure>,
    /// Aggregate statistics.
    pub stats: BatchStats,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Summary of a question set (without the canonical answers).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSetSummary {
    pub id: String,
    pub name: String,
    pub question_count: usize,
}

impl From<&QuestionSet> for QuestionSetSummary {
    fn from(set: &QuestionSet) -> Self {
        Self {
            id: set.id.clone(),
            name: set.name.clone(),
            question_count: set.questions.len(),
        }
    }
}

/// A scored application tagged with the record it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationVerdict {
    pub application_id: String,
    #[serde(default)]
    pub applicant_name: String,
    pub scored: ScoredApplication,
}

/// An application that could not be scored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringFailure {
    pub application_id: String,
    /// The question id that could not be resolved.
    pub question_id: String,
    pub error: String,
}

impl ScoreReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: ScoreReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Save the markdown rendering of the report.
    pub fn save_markdown(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_markdown())
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("## {} ({})\n\n", self.question_set.name, self.question_set.id));
        md.push_str(&format!(
            "**Summary:** {} accepted, {} rejected, {} failed ({:.1}% acceptance)\n\n",
            self.stats.accepted,
            self.stats.rejected,
            self.stats.failed,
            self.stats.acceptance_rate * 100.0
        ));

        if !self.verdicts.is_empty() {
            md.push_str("### Applications\n\n");
            md.push_str("| Application | Name | Passed | Verdict |\n");
            md.push_str("|-------------|------|--------|---------|\n");
            for v in &self.verdicts {
                md.push_str(&format!(
                    "| {} | {} | {}/{} | {} |\n",
                    v.application_id,
                    v.applicant_name,
                    v.scored.passed_count(),
                    v.scored.responses.len(),
                    if v.scored.accepted { "accepted" } else { "rejected" }
                ));
            }
            md.push('\n');
        }

        if !self.stats.per_question.is_empty() {
            md.push_str("### Questions\n\n");
            md.push_str("| Question | Answered | Pass rate | Mean ratio |\n");
            md.push_str("|----------|----------|-----------|------------|\n");
            for q in self.stats.per_question.values() {
                md.push_str(&format!(
                    "| {} | {} | {:.1}% | {:.1} |\n",
                    q.question_id,
                    q.answered,
                    q.pass_rate * 100.0,
                    q.mean_average_ratio
                ));
            }
            md.push('\n');
        }

        if !self.failures.is_empty() {
            md.push_str("### Failures\n\n");
            for f in &self.failures {
                md.push_str(&format!("- `{}`: {}\n", f.application_id, f.error));
            }
        }

        md
    }

    /// Compare verdicts against a baseline report.
    pub fn compare(&self, baseline: &ScoreReport) -> DecisionDiff {
        let verdict_map = |report: &ScoreReport| -> HashMap<String, (String, bool)> {
            report
                .verdicts
                .iter()
                .map(|v| {
                    (
                        v.application_id.clone(),
                        (v.applicant_name.clone(), v.scored.accepted),
                    )
                })
                .collect()
        };

        let baseline_verdicts = verdict_map(baseline);

        let mut newly_accepted = Vec::new();
        let mut newly_rejected = Vec::new();
        let mut unchanged = 0usize;
        let mut new_applications = 0usize;

        for v in &self.verdicts {
            let Some((_, was_accepted)) = baseline_verdicts.get(&v.application_id) else {
                new_applications += 1;
                continue;
            };
            let change = DecisionChange {
                application_id: v.application_id.clone(),
                applicant_name: v.applicant_name.clone(),
                baseline_accepted: *was_accepted,
                current_accepted: v.scored.accepted,
            };
            match (was_accepted, v.scored.accepted) {
                (false, true) => newly_accepted.push(change),
                (true, false) => newly_rejected.push(change),
                _ => unchanged += 1,
            }
        }

        let current_ids: std::collections::HashSet<&str> = self
            .verdicts
            .iter()
            .map(|v| v.application_id.as_str())
            .collect();
        let removed_applications = baseline_verdicts
            .keys()
            .filter(|id| !current_ids.contains(id.as_str()))
            .count();

        DecisionDiff {
            newly_accepted,
            newly_rejected,
            unchanged,
            new_applications,
            removed_applications,
        }
    }
}

/// Result of comparing the verdicts of two reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionDiff {
    /// Rejected in the baseline, accepted now.
    pub newly_accepted: Vec<DecisionChange>,
    /// Accepted in the baseline, rejected now.
    pub newly_rejected: Vec<DecisionChange>,
    /// Applications with the same verdict in both reports.
    pub unchanged: usize,
    /// Applications in current but not baseline.
    pub new_applications: usize,
    /// Applications in baseline but not current.
    pub removed_applications: usize,
}

/// A flipped verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionChange {
    pub application_id: String,
    pub applicant_name: String,
    pub baseline_accepted: bool,
    pub current_accepted: bool,
}

impl DecisionDiff {
    /// Format the diff as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} newly accepted, {} newly rejected, {} unchanged\n\n",
            self.newly_accepted.len(),
            self.newly_rejected.len(),
            self.unchanged
        ));

        for (title, changes) in [
            ("Newly accepted", &self.newly_accepted),
            ("Newly rejected", &self.newly_rejected),
        ] {
            if changes.is_empty() {
                continue;
            }
            md.push_str(&format!("### {title}\n\n"));
            md.push_str("| Application | Name |\n");
            md.push_str("|-------------|------|\n");
            for c in changes {
                md.push_str(&format!("| {} | {} |\n", c.application_id, c.applicant_name));
            }
            md.push('\n');
        }

        md
    }

    /// Returns true if any verdict flipped.
    pub fn has_changes(&self) -> bool {
        !self.newly_accepted.is_empty() || !self.newly_rejected.is_empty()
    }
}
