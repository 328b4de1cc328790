//! The `jobber validate` command.

use std::path::PathBuf;

use anyhow::Result;

use jobber_core::parser::{self, ValidationWarning};

pub fn execute(questions_path: PathBuf, applications_path: Option<PathBuf>) -> Result<()> {
    let set = parser::parse_question_set(&questions_path)?;
    println!("Question set: {} ({} questions)", set.name, set.questions.len());

    let mut warnings = parser::validate_question_set(&set);

    if let Some(path) = &applications_path {
        let applications = parser::load_applications(path)?;
        println!("Applications: {}", applications.len());
        warnings.extend(parser::validate_applications(&set, &applications));
    }

    for w in &warnings {
        println!("{} WARNING: {}", prefix(w), w.message);
    }

    if warnings.is_empty() {
        println!("All inputs valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}

fn prefix(w: &ValidationWarning) -> String {
    match (&w.application_id, &w.question_id) {
        (Some(app), Some(q)) => format!("  [{app}/{q}]"),
        (Some(app), None) => format!("  [{app}]"),
        (None, Some(q)) => format!("  [{q}]"),
        (None, None) => "  ".to_string(),
    }
}
