//! jobber CLI — score job applications against canonical answers.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use jobber_core::metrics::Metric;

mod commands;

#[derive(Parser)]
#[command(name = "jobber", version, about = "Fuzzy job-application answer scorer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score applications against a question set
    Score {
        /// Path to the question set .toml
        #[arg(long)]
        questions: PathBuf,

        /// Application file (.json/.toml) or directory
        #[arg(long)]
        applications: PathBuf,

        /// Max concurrent applications (default from config)
        #[arg(long)]
        parallelism: Option<usize>,

        /// Output directory (default from config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: json, markdown, all, none (default from config)
        #[arg(long)]
        format: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show every similarity metric for two strings
    Ratio {
        /// Applicant answer
        answer: String,

        /// Canonical answer
        canonical: String,

        /// Only show these metrics (repeatable)
        #[arg(long = "metric")]
        metrics: Vec<Metric>,
    },

    /// Validate a question set, optionally against applications
    Validate {
        /// Path to the question set .toml
        #[arg(long)]
        questions: PathBuf,

        /// Application file or directory to check
        #[arg(long)]
        applications: Option<PathBuf>,
    },

    /// Compare the verdicts of two score reports
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Exit code 1 if any verdict flipped
        #[arg(long)]
        fail_on_change: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create starter config, question set and application
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("jobber=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            questions,
            applications,
            parallelism,
            output,
            format,
            config,
        } => {
            commands::score::execute(questions, applications, parallelism, output, format, config)
                .await
        }
        Commands::Ratio {
            answer,
            canonical,
            metrics,
        } => commands::ratio::execute(&answer, &canonical, &metrics),
        Commands::Validate {
            questions,
            applications,
        } => commands::validate::execute(questions, applications),
        Commands::Compare {
            baseline,
            current,
            fail_on_change,
            format,
        } => commands::compare::execute(baseline, current, fail_on_change, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
