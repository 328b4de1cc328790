//! The `jobber init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("jobber.toml"), SAMPLE_CONFIG)?;
    write_if_missing(Path::new("questions.toml"), EXAMPLE_QUESTIONS)?;

    std::fs::create_dir_all("applications")?;
    write_if_missing(Path::new("applications/example.json"), EXAMPLE_APPLICATIONS)?;

    println!("\nNext steps:");
    println!("  1. Edit questions.toml with your screening questions");
    println!("  2. Run: jobber validate --questions questions.toml --applications applications");
    println!("  3. Run: jobber score --questions questions.toml --applications applications");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# jobber configuration

parallelism = 4
output_dir = "./jobber-results"
format = "json"
"#;

const EXAMPLE_QUESTIONS: &str = r#"[question_set]
id = "example"
name = "Example Screening"
description = "A small question set to get started"

[[questions]]
id = "capital"
question = "What is the capital of France?"
answer = "Paris"

[[questions]]
id = "http-status"
question = "Which HTTP status code means Not Found?"
answer = "404 not found"

[[questions]]
id = "motivation"
question = "Why do you want to join us?"
answer = "any"
"#;

const EXAMPLE_APPLICATIONS: &str = r#"[
  {
    "id": "app-001",
    "name": "Ada Lovelace",
    "applicant_responses": [
      {"id": "capital", "answer": "paris"},
      {"id": "http-status", "answer": "404"},
      {"id": "motivation", "answer": "I enjoy building engines"}
    ]
  },
  {
    "id": "app-002",
    "name": "Charles Babbage",
    "applicant_responses": [
      {"id": "capital", "answer": "Lyon"},
      {"id": "http-status", "answer": "It is 404 Not Found"},
      {"id": "motivation", "answer": ""}
    ]
  }
]
"#;
