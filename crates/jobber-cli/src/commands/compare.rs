//! The `jobber compare` command.

use std::path::PathBuf;

use anyhow::Result;

use jobber_core::report::ScoreReport;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    fail_on_change: bool,
    format: String,
) -> Result<()> {
    let baseline = ScoreReport::load_json(&baseline_path)?;
    let current = ScoreReport::load_json(&current_path)?;

    let diff = current.compare(&baseline);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", diff.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&diff)?);
        }
        _ => {
            // text format
            println!(
                "Comparison: {} newly accepted, {} newly rejected, {} unchanged",
                diff.newly_accepted.len(),
                diff.newly_rejected.len(),
                diff.unchanged
            );

            if !diff.newly_accepted.is_empty() {
                println!("\nNewly accepted:");
                for c in &diff.newly_accepted {
                    println!("  {} ({})", c.application_id, c.applicant_name);
                }
            }

            if !diff.newly_rejected.is_empty() {
                println!("\nNewly rejected:");
                for c in &diff.newly_rejected {
                    println!("  {} ({})", c.application_id, c.applicant_name);
                }
            }

            if diff.new_applications > 0 {
                println!("\n{} new application(s)", diff.new_applications);
            }
            if diff.removed_applications > 0 {
                println!("{} removed application(s)", diff.removed_applications);
            }
        }
    }

    if fail_on_change && diff.has_changes() {
        std::process::exit(1);
    }

    Ok(())
}
