//! The `jobber ratio` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use jobber_core::containment::contains_all_tokens;
use jobber_core::metrics::{Metric, Similarity};
use jobber_core::scorer::{passes, PASS_THRESHOLD};
use jobber_core::RatioSet;

/// Print metric scores for one answer. An empty `metrics` selection shows all six.
pub fn execute(answer: &str, canonical: &str, metrics: &[Metric]) -> Result<()> {
    let ratios = RatioSet::compute(answer, canonical);
    let selected = if metrics.is_empty() {
        &Metric::ALL[..]
    } else {
        metrics
    };

    let mut table = Table::new();
    table.set_header(vec!["Metric", "Score"]);
    for (metric, score) in ratios.iter().filter(|(m, _)| selected.contains(m)) {
        table.add_row(vec![Cell::new(metric.name()), Cell::new(score)]);
    }
    table.add_row(vec![
        Cell::new("average"),
        Cell::new(format!("{:.2}", ratios.average)),
    ]);

    println!("{table}");
    println!("contained: {}", contains_all_tokens(answer, canonical));
    println!(
        "passed: {} (partial_token_set >= {PASS_THRESHOLD} or wildcard)",
        passes(canonical, &ratios)
    );

    Ok(())
}
