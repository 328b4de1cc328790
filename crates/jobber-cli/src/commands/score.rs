//! The `jobber score` command.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

use jobber_core::config::load_config_from;
use jobber_core::engine::{ProgressReporter, ScoringEngine, ScoringEngineConfig};
use jobber_core::parser;
use jobber_core::report::{ApplicationVerdict, ScoreReport};

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_application_complete(&self, verdict: &ApplicationVerdict) {
        eprintln!(
            "  Done: {} [{}/{} passed] {}",
            verdict.application_id,
            verdict.scored.passed_count(),
            verdict.scored.responses.len(),
            if verdict.scored.accepted {
                "ACCEPTED"
            } else {
                "REJECTED"
            },
        );
    }

    fn on_application_error(&self, application_id: &str, error: &str) {
        eprintln!("  ERROR: {application_id}: {error}");
    }

    fn on_batch_complete(&self, total: usize, accepted: usize, failed: usize, elapsed: Duration) {
        eprintln!(
            "\nComplete: {accepted}/{total} accepted, {failed} failed ({:.1}s)",
            elapsed.as_secs_f64()
        );
    }
}

const KNOWN_FORMATS: &[&str] = &["json", "markdown", "md", "none"];

pub async fn execute(
    questions_path: PathBuf,
    applications_path: PathBuf,
    parallelism: Option<usize>,
    output: Option<PathBuf>,
    format: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let parallelism = parallelism.unwrap_or(config.parallelism);
    anyhow::ensure!(parallelism >= 1, "parallelism must be at least 1");
    let output = output.unwrap_or(config.output_dir);
    let format = format.unwrap_or(config.format);

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "markdown"]
    } else {
        format.split(',').map(str::trim).collect()
    };
    if let Some(unknown) = formats.iter().find(|f| !KNOWN_FORMATS.contains(*f)) {
        anyhow::bail!("unknown output format: '{unknown}' (expected json, markdown, all or none)");
    }

    let question_set = parser::parse_question_set(&questions_path)?;
    for w in parser::validate_question_set(&question_set) {
        let id = w.question_id.as_deref().unwrap_or("-");
        tracing::warn!("question set [{id}]: {}", w.message);
    }

    let applications = parser::load_applications(&applications_path)?;
    anyhow::ensure!(
        !applications.is_empty(),
        "no applications found in {}",
        applications_path.display()
    );

    eprintln!(
        "jobber v{} — Scoring {} applications against {} questions",
        env!("CARGO_PKG_VERSION"),
        applications.len(),
        question_set.questions.len()
    );
    eprintln!();

    let engine = ScoringEngine::new(question_set, ScoringEngineConfig { parallelism });
    let report = engine.run(applications, &ConsoleReporter).await?;

    print_summary(&report);

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
    for fmt in &formats {
        match *fmt {
            "json" => {
                let path = output.join(format!("report-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            "markdown" | "md" => {
                let path = output.join(format!("report-{timestamp}.md"));
                report.save_markdown(&path)?;
                eprintln!("Markdown report: {}", path.display());
            }
            _ => {}
        }
    }

    Ok(())
}

fn print_summary(report: &ScoreReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Application", "Name", "Passed", "Avg ratio", "Verdict"]);

    for verdict in &report.verdicts {
        let scored = &verdict.scored;
        let mean_ratio = if scored.responses.is_empty() {
            0.0
        } else {
            scored.responses.iter().map(|r| r.ratios.average).sum::<f64>()
                / scored.responses.len() as f64
        };
        table.add_row(vec![
            Cell::new(&verdict.application_id),
            Cell::new(&verdict.applicant_name),
            Cell::new(format!(
                "{}/{}",
                scored.passed_count(),
                scored.responses.len()
            )),
            Cell::new(format!("{mean_ratio:.1}")),
            Cell::new(if scored.accepted { "accepted" } else { "rejected" }),
        ]);
    }

    println!("{table}");

    for failure in &report.failures {
        println!("FAILED {}: {}", failure.application_id, failure.error);
    }

    println!(
        "{} accepted, {} rejected, {} failed",
        report.stats.accepted, report.stats.rejected, report.stats.failed
    );
}
