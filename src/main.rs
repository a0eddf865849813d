use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use scrivener::config::Config;
use scrivener::output::{markdown, terminal};
use scrivener::pipeline::batch;
use scrivener::similarity::report::annotate;
use scrivener::similarity::traits::DocumentScorer;

/// Scrivener: similarity checks for academic writing.
///
/// Finds lines of a document that repeat each other, and compares a text
/// against known reference sources.
#[derive(Parser)]
#[command(name = "scrivener", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one or more documents for internal repetition
    Score {
        /// Plain-text files to score ("-" reads standard input)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print the report as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Print every line with repeated ones highlighted (single document only)
        #[arg(long)]
        annotate: bool,

        /// Flag line pairs above this similarity (default: 0.7)
        #[arg(long)]
        threshold: Option<f64>,

        /// Ignore lines this short or shorter after trimming (default: 20)
        #[arg(long)]
        min_chars: Option<usize>,

        /// Vector weighting: "tfidf" or "tf" (default: tfidf)
        #[arg(long)]
        weighting: Option<String>,

        /// Number of documents to score in parallel (default: 4)
        #[arg(long)]
        concurrency: Option<usize>,
    },

    /// Compare a document against reference texts
    Compare {
        /// The plain-text file to check ("-" reads standard input)
        file: PathBuf,

        /// Reference files to compare against (repeat for several)
        #[arg(short, long = "reference", required = true)]
        references: Vec<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Flag the document when a reference is above this similarity (default: 0.8)
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Score documents and write a Markdown report
    Report {
        /// Plain-text files to score
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Where to write the report
        #[arg(short, long, default_value = "similarity-report.md")]
        output: PathBuf,

        /// Flag line pairs above this similarity (default: 0.7)
        #[arg(long)]
        threshold: Option<f64>,

        /// Number of documents to score in parallel (default: 4)
        #[arg(long)]
        concurrency: Option<usize>,
    },

    /// Show the effective configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so JSON on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("scrivener=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Score {
            files,
            json,
            annotate: show_annotated,
            threshold,
            min_chars,
            weighting,
            concurrency,
        } => {
            let mut overrides = Vec::new();
            push_override(&mut overrides, "SCRIVENER_PAIR_THRESHOLD", threshold);
            push_override(&mut overrides, "SCRIVENER_MIN_UNIT_CHARS", min_chars);
            push_override(&mut overrides, "SCRIVENER_WEIGHTING", weighting);
            push_override(&mut overrides, "SCRIVENER_CONCURRENCY", concurrency);
            let config = Config::load_with(&overrides)?;

            let scorer = config.scorer();

            if let [path] = files.as_slice() {
                let text = read_document(path)?;
                info!(source = %path.display(), weighting = %config.weighting, "Scoring document");
                let report = scorer.score(&text);

                if json {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                } else {
                    terminal::display_report(&report, config.pair_threshold);
                    if show_annotated {
                        let units = annotate(&text, &report, config.min_unit_chars);
                        terminal::display_annotated(&units);
                    }
                }
                return Ok(());
            }

            if show_annotated {
                println!(
                    "{}",
                    "--annotate applies to a single document; showing the summary only.".dimmed()
                );
            }

            let sources = batch::Source::from_args(&files, read_stdin)?;
            let reports = batch::run(&sources, Arc::new(scorer), config.concurrency).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                terminal::display_batch_summary(&reports);
            }
        }

        Commands::Compare {
            file,
            references,
            json,
            threshold,
        } => {
            let mut overrides = Vec::new();
            push_override(&mut overrides, "SCRIVENER_REFERENCE_THRESHOLD", threshold);
            let config = Config::load_with(&overrides)?;

            let text = read_document(&file)?;
            let reference_texts = references
                .iter()
                .map(|p| read_document(p))
                .collect::<Result<Vec<String>>>()?;

            let report = config.reference_checker().check(&text, &reference_texts)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let names: Vec<String> = references
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect();
                terminal::display_reference_report(&report, &names);
            }
        }

        Commands::Report {
            files,
            output,
            threshold,
            concurrency,
        } => {
            let mut overrides = Vec::new();
            push_override(&mut overrides, "SCRIVENER_PAIR_THRESHOLD", threshold);
            push_override(&mut overrides, "SCRIVENER_CONCURRENCY", concurrency);
            let config = Config::load_with(&overrides)?;

            let sources = batch::Source::from_args(&files, read_stdin)?;
            let scorer: Arc<dyn DocumentScorer> = Arc::new(config.scorer());
            let reports = batch::run(&sources, scorer, config.concurrency).await?;

            terminal::display_batch_summary(&reports);
            markdown::generate_report(&reports, config.pair_threshold, &output)?;
            println!(
                "{} Report written to {}",
                "✓".green(),
                output.display().to_string().bold()
            );
        }

        Commands::Config => {
            let config = Config::load()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

/// Record a command-line value under the environment key it replaces.
fn push_override<T: ToString>(
    overrides: &mut Vec<(&'static str, String)>,
    key: &'static str,
    value: Option<T>,
) {
    if let Some(v) = value {
        overrides.push((key, v.to_string()));
    }
}

fn read_stdin() -> Result<String> {
    Ok(std::io::read_to_string(std::io::stdin())?)
}

/// Read a UTF-8 text document, or standard input when the path is "-".
fn read_document(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        return read_stdin().context("Failed to read standard input");
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
