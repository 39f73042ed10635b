//! Binary entry point for lessonkit.
//!
//! This binary provides the CLI interface for the lesson extractor and the
//! knowledge-base merge engine.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use lessonkit::observability::{self, InitOptions};
use lessonkit::{Category, CommitMonitor, Error, LessonkitConfig, LessonsService, PointDraft};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Lessonkit - Turns problem/solution narratives into a project knowledge base.
#[derive(Parser)]
#[command(name = "lessonkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Extract lessons from a chat transcript and merge them.
    AnalyzeChat {
        /// Transcript file.
        file: PathBuf,
    },

    /// Extract lessons from recent commits and merge them.
    AnalyzeCommits {
        /// Number of commits to read.
        limit: Option<usize>,
    },

    /// Watch for new commits until interrupted.
    MonitorCommits,

    /// Merge one hand-written lesson.
    Manual {
        /// Where the lesson came from.
        context: String,

        /// What went wrong.
        problem: String,

        /// What fixed it.
        solution: String,

        /// Category name; unknown names fall back to General.
        category: Option<String>,
    },

    /// Run the chat and commit pipelines.
    FullAnalysis {
        /// Optional transcript file.
        file: Option<PathBuf>,
    },

    /// Append numbered points to an existing section.
    AppendPoints {
        /// Section name, matched case-insensitively.
        section: String,

        /// Point as `Title|bullet|bullet`. Repeatable.
        #[arg(short, long = "point", required = true)]
        points: Vec<String>,
    },

    /// Rewrite the takeaway line of an existing section.
    UpdateTakeaway {
        /// Section name, matched case-insensitively.
        section: String,

        /// New takeaway sentence.
        takeaway: String,
    },

    /// Show statistics for the knowledge-base document.
    Stats,
}

/// Main entry point.
fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match LessonkitConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    let _observability = match observability::init_from_config(
        &config,
        InitOptions {
            verbose: cli.verbose,
        },
    ) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to initialize observability: {e}");
            return ExitCode::FAILURE;
        },
    };

    match run_command(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(cli: Cli, config: &LessonkitConfig) -> Result<(), Box<dyn std::error::Error>> {
    let service = LessonsService::from_config(config);

    match cli.command {
        Commands::AnalyzeChat { file } => cmd_analyze_chat(&service, &file),

        Commands::AnalyzeCommits { limit } => {
            cmd_analyze_commits(&service, limit.unwrap_or(config.commit_limit))
        },

        Commands::MonitorCommits => cmd_monitor_commits(&service, config),

        Commands::Manual {
            context,
            problem,
            solution,
            category,
        } => cmd_manual(&service, &context, &problem, &solution, category.as_deref()),

        Commands::FullAnalysis { file } => {
            cmd_full_analysis(&service, file.as_deref(), config.commit_limit)
        },

        Commands::AppendPoints { section, points } => {
            cmd_append_points(&service, &section, &points)
        },

        Commands::UpdateTakeaway { section, takeaway } => {
            print_json(&service.update_takeaway(&section, &takeaway))
        },

        Commands::Stats => print_json(&service.stats()?),
    }
}

type Service = LessonsService<lessonkit::git::GitCommitLog>;

fn cmd_analyze_chat(service: &Service, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let transcript = read_transcript(file)?;
    print_json(&service.analyze_chat(&transcript))
}

fn cmd_analyze_commits(service: &Service, limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    print_json(&service.analyze_commits(limit)?)
}

fn cmd_monitor_commits(
    service: &Service,
    config: &LessonkitConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    })?;

    eprintln!(
        "Monitoring {} every {}s, press Ctrl-C to stop",
        config.project_path.display(),
        config.poll_interval_secs
    );

    let mut monitor = CommitMonitor::new(config.poll_interval());
    let analysed = monitor.run(service, &stop, |report| {
        if let Err(e) = print_json(report) {
            eprintln!("Failed to print report: {e}");
        }
    })?;

    eprintln!("Stopped after {analysed} new commit(s)");
    Ok(())
}

fn cmd_manual(
    service: &Service,
    context: &str,
    problem: &str,
    solution: &str,
    category: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let category = parse_category(category);
    print_json(&service.manual(context, problem, solution, category))
}

fn cmd_full_analysis(
    service: &Service,
    file: Option<&Path>,
    limit: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let transcript = file.map(read_transcript).transpose()?;
    print_json(&service.full_analysis(transcript.as_deref(), limit)?)
}

fn cmd_append_points(
    service: &Service,
    section: &str,
    points: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let drafts = points
        .iter()
        .map(String::as_str)
        .map(parse_point)
        .collect::<lessonkit::Result<Vec<_>>>()?;
    print_json(&service.append_points(section, &drafts))
}

/// Parses a category name, falling back to `General`.
fn parse_category(name: Option<&str>) -> Category {
    match name {
        Some(name) => Category::parse(name).unwrap_or_else(|| {
            eprintln!("Unknown category '{name}', using General");
            Category::General
        }),
        None => Category::General,
    }
}

/// Parses `Title|bullet|bullet` into a point draft.
fn parse_point(spec: &str) -> lessonkit::Result<PointDraft> {
    let mut parts = spec.split('|').map(str::trim);
    let title = parts.next().unwrap_or_default();
    if title.is_empty() {
        return Err(Error::InvalidInput(format!("point '{spec}' has no title")));
    }
    let bullets = parts
        .filter(|b| !b.is_empty())
        .map(str::to_string)
        .collect();
    Ok(PointDraft::new(title, bullets))
}

fn read_transcript(path: &Path) -> lessonkit::Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::io("read_transcript", path, &e))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
