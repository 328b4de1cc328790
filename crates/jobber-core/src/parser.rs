//! Question-set and application loaders.
//!
//! Question sets are TOML files; applications are JSON or TOML, chosen by
//! file extension. Both are validated for the mistakes that silently skew
//! scoring.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Application, Question, QuestionSet};
use crate::scorer::is_wildcard;

/// Intermediate TOML structure for question-set files.
#[derive(Debug, Deserialize)]
struct TomlQuestionFile {
    question_set: TomlQuestionSetHeader,
    #[serde(default)]
    questions: Vec<Question>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestionSetHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

/// Parse a single TOML file into a `QuestionSet`.
pub fn parse_question_set(path: &Path) -> Result<QuestionSet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question set file: {}", path.display()))?;

    parse_question_set_str(&content, path)
}

/// Parse a TOML string into a `QuestionSet` (useful for testing).
pub fn parse_question_set_str(content: &str, source_path: &Path) -> Result<QuestionSet> {
    let parsed: TomlQuestionFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    Ok(QuestionSet {
        id: parsed.question_set.id,
        name: parsed.question_set.name,
        description: parsed.question_set.description,
        questions: parsed.questions,
    })
}

/// On-disk encodings accepted for applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationFormat {
    Json,
    Toml,
}

impl ApplicationFormat {
    /// Pick a format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(ApplicationFormat::Json),
            "toml" => Some(ApplicationFormat::Toml),
            _ => None,
        }
    }
}

/// An application file holds one application or a batch of them.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApplicationFile {
    List(Vec<Application>),
    Batch { applications: Vec<Application> },
    Single(Application),
}

impl ApplicationFile {
    fn into_vec(self) -> Vec<Application> {
        match self {
            ApplicationFile::List(apps) | ApplicationFile::Batch { applications: apps } => apps,
            ApplicationFile::Single(app) => vec![app],
        }
    }
}

/// Parse applications from a string in the given format.
pub fn parse_applications_str(
    content: &str,
    format: ApplicationFormat,
    source_path: &Path,
) -> Result<Vec<Application>> {
    let file: ApplicationFile = match format {
        ApplicationFormat::Json => serde_json::from_str(content)
            .with_context(|| format!("failed to parse JSON: {}", source_path.display()))?,
        ApplicationFormat::Toml => toml::from_str(content)
            .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?,
    };
    Ok(file.into_vec())
}

/// Parse the applications stored in a `.json` or `.toml` file.
pub fn parse_applications(path: &Path) -> Result<Vec<Application>> {
    let format = ApplicationFormat::from_path(path).with_context(|| {
        format!(
            "unsupported application file (expected .json or .toml): {}",
            path.display()
        )
    })?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read application file: {}", path.display()))?;

    parse_applications_str(&content, format, path)
}

/// Recursively load all application files from a directory.
///
/// Files are visited in path order so batch output is stable. Files that
/// fail to parse are skipped with a warning.
pub fn load_application_directory(dir: &Path) -> Result<Vec<Application>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()?;
    paths.sort();

    let mut applications = Vec::new();
    for path in paths {
        if path.is_dir() {
            applications.extend(load_application_directory(&path)?);
        } else if ApplicationFormat::from_path(&path).is_some() {
            match parse_applications(&path) {
                Ok(apps) => applications.extend(apps),
                Err(e) => {
                    tracing::warn!("skipping {}: {e:#}", path.display());
                }
            }
        }
    }

    Ok(applications)
}

/// Load applications from a file or a directory.
pub fn load_applications(path: &Path) -> Result<Vec<Application>> {
    if path.is_dir() {
        load_application_directory(path)
    } else {
        parse_applications(path)
    }
}

/// A warning from question-set or application validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// The application ID (if applicable).
    pub application_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn question(id: &str, message: impl Into<String>) -> Self {
        Self {
            question_id: Some(id.to_string()),
            application_id: None,
            message: message.into(),
        }
    }
}

/// Validate a question set for common issues.
pub fn validate_question_set(set: &QuestionSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if set.questions.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            application_id: None,
            message: "question set has no questions".into(),
        });
    }

    let mut seen_ids = HashSet::new();
    for q in &set.questions {
        if !seen_ids.insert(q.id.as_str()) {
            warnings.push(ValidationWarning::question(
                &q.id,
                format!("duplicate question ID: {} (first definition wins)", q.id),
            ));
        }
    }

    for q in &set.questions {
        if q.answer.is_empty() {
            warnings.push(ValidationWarning::question(
                &q.id,
                "canonical answer is empty; only a blank response can pass",
            ));
        } else if q.answer.starts_with(' ') || q.answer.ends_with(' ') || q.answer.contains("  ")
        {
            warnings.push(ValidationWarning::question(
                &q.id,
                "canonical answer has leading, trailing or repeated spaces (produces empty tokens)",
            ));
        }
    }

    for q in &set.questions {
        if is_wildcard(&q.answer) {
            warnings.push(ValidationWarning::question(
                &q.id,
                "wildcard answer: every response passes",
            ));
        }
    }

    warnings
}

/// Check applications against a question set before scoring.
pub fn validate_applications(
    set: &QuestionSet,
    applications: &[Application],
) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_apps = HashSet::new();
    for app in applications {
        if !seen_apps.insert(app.id.as_str()) {
            warnings.push(ValidationWarning {
                question_id: None,
                application_id: Some(app.id.clone()),
                message: format!("duplicate application ID: {}", app.id),
            });
        }

        for response in &app.responses {
            if set.question(&response.id).is_none() {
                warnings.push(ValidationWarning {
                    question_id: Some(response.id.clone()),
                    application_id: Some(app.id.clone()),
                    message: format!(
                        "unknown question ID: {} (application will fail to score)",
                        response.id
                    ),
                });
            }
        }

        let answered: HashSet<&str> = app.responses.iter().map(|r| r.id.as_str()).collect();
        for q in &set.questions {
            if !answered.contains(q.id.as_str()) {
                warnings.push(ValidationWarning {
                    question_id: Some(q.id.clone()),
                    application_id: Some(app.id.clone()),
                    message: "question not answered".into(),
                });
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ApplicantResponse;
    use crate::scorer::score_response;

    const VALID_TOML: &str = r#"
[question_set]
id = "backend-2026"
name = "Backend Engineer"
description = "First-round screening"

[[questions]]
id = "q1"
question = "What is the capital of France?"
answer = "Paris"

[[questions]]
id = "q2"
question = "Why do you want this job?"
answer = "any"
"#;

    const APPLICATION_JSON: &str = r#"{
    "id": "app-1",
    "name": "Ada Lovelace",
    "applicant_responses": [
        {"id": "q1", "answer": "paris"},
        {"id": "q2", "answer": "I like engines"}
    ]
}"#;

    #[test]
    fn parse_valid_toml() {
        let set = parse_question_set_str(VALID_TOML, &PathBuf::from("q.toml")).unwrap();
        assert_eq!(set.id, "backend-2026");
        assert_eq!(set.name, "Backend Engineer");
        assert_eq!(set.questions.len(), 2);
        assert_eq!(set.questions[0].answer, "Paris");
    }

    #[test]
    fn parse_missing_optional_fields() {
        let toml = r#"
[question_set]
id = "minimal"
name = "Minimal"

[[questions]]
id = "q1"
answer = "yes"
"#;
        let set = parse_question_set_str(toml, &PathBuf::from("q.toml")).unwrap();
        assert!(set.description.is_empty());
        assert!(set.questions[0].question.is_empty());
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_question_set_str(bad, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn parse_single_json_application() {
        let apps = parse_applications_str(
            APPLICATION_JSON,
            ApplicationFormat::Json,
            &PathBuf::from("a.json"),
        )
        .unwrap();
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].name, "Ada Lovelace");
        assert_eq!(apps[0].responses[0], ApplicantResponse::new("q1", "paris"));
    }

    #[test]
    fn parse_json_list_and_toml_batch() {
        let list = format!("[{APPLICATION_JSON}, {APPLICATION_JSON}]");
        let apps =
            parse_applications_str(&list, ApplicationFormat::Json, &PathBuf::from("a.json"))
                .unwrap();
        assert_eq!(apps.len(), 2);

        let toml = r#"
[[applications]]
id = "a1"
name = "One"

[[applications.responses]]
id = "q1"
answer = "Paris"

[[applications]]
id = "a2"
name = "Two"
"#;
        let apps =
            parse_applications_str(toml, ApplicationFormat::Toml, &PathBuf::from("a.toml"))
                .unwrap();
        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0].responses.len(), 1);
        assert!(apps[1].responses.is_empty());
    }

    #[test]
    fn unsupported_extension() {
        let err = parse_applications(Path::new("applications.yaml")).unwrap_err();
        assert!(err.to_string().contains("unsupported"));
    }

    #[test]
    fn load_directory_in_path_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("b.json"),
            r#"{"id": "b", "responses": []}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("a.json"),
            r#"{"id": "a", "responses": []}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("broken.json"), "{ nope").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let apps = load_application_directory(dir.path()).unwrap();
        let ids: Vec<&str> = apps.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn validate_question_set_issues() {
        let toml = r#"
[question_set]
id = "issues"
name = "Issues"

[[questions]]
id = "same"
answer = "x"

[[questions]]
id = "same"
answer = "y"

[[questions]]
id = "blank"
answer = ""

[[questions]]
id = "spaced"
answer = "new  york "

[[questions]]
id = "free"
answer = "ANY"
"#;
        let set = parse_question_set_str(toml, &PathBuf::from("q.toml")).unwrap();
        let warnings = validate_question_set(&set);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
        let blank = warnings
            .iter()
            .find(|w| w.question_id.as_deref() == Some("blank"))
            .unwrap();
        assert!(blank.message.contains("only a blank response can pass"));

        let blank_answer = &set.question("blank").unwrap().answer;
        for (response, expected) in [("", true), (" ", true), ("anything at all", false)] {
            let scored = score_response(&ApplicantResponse::new("blank", response), blank_answer);
            assert_eq!(scored.passed, expected, "{response:?}");
        }
        assert!(warnings
            .iter()
            .any(|w| w.question_id.as_deref() == Some("spaced")));
        assert!(warnings.iter().any(|w| w.message.contains("wildcard")));
    }

    #[test]
    fn validate_applications_flags_unknown_and_missing() {
        let set = parse_question_set_str(VALID_TOML, &PathBuf::from("q.toml")).unwrap();
        let apps = vec![Application {
            id: "app".into(),
            name: String::new(),
            responses: vec![ApplicantResponse::new("q9", "?")],
        }];
        let warnings = validate_applications(&set, &apps);
        assert!(warnings.iter().any(|w| w.message.contains("unknown question ID: q9")));
        assert_eq!(
            warnings
                .iter()
                .filter(|w| w.message == "question not answered")
                .count(),
            2
        );
    }
}
