use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use confsched::models::{Problem, TopicPolicy};
use confsched::report;
use confsched::solver;

/// Conference-session scheduler.
///
/// Loads a scheduling problem, solves it with Z3, and prints the
/// session-ordered schedule report. Without an input path the bundled
/// workshop dataset is used.
#[derive(Debug, Parser)]
#[command(name = "confsched", version, about, long_about = None)]
struct Cli {
    /// Path to a problem JSON file.
    input: Option<PathBuf>,

    /// Override the instance's topic policy.
    #[arg(long, value_enum)]
    topic_policy: Option<PolicyArg>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

/// CLI spelling of the topic policy.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Force all talks sharing a tag into one session.
    Pinned,
    /// Reward co-location without requiring it.
    Soft,
}

impl From<PolicyArg> for TopicPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::Pinned => TopicPolicy::Pinned,
            PolicyArg::Soft => TopicPolicy::Soft,
        }
    }
}

const DEFAULT_DATASET: &str = include_str!("../data/parslfest.json");

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let text = match &cli.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => DEFAULT_DATASET.to_string(),
    };
    let mut problem = Problem::from_json(&text).context("failed to parse problem")?;

    if let Some(policy) = cli.topic_policy {
        problem.topic_policy = policy.into();
    }

    let schedule = solver::solve(&problem)?;
    print!("{}", report::render(&problem, &schedule));
    println!(
        "\nmovement cost: {:.2}, soft penalty: {:.2}",
        schedule.movement_cost, schedule.soft_penalty
    );

    Ok(())
}
