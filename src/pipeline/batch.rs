// Batch pipeline: score many documents with bounded concurrency.
//
// Each document is read asynchronously, then scored on tokio's blocking pool
// since scoring is pure CPU work. Documents that can't be read are logged and
// skipped rather than failing the whole batch.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::similarity::report::SimilarityReport;
use crate::similarity::traits::DocumentScorer;

/// Display name for text read from standard input.
pub const STDIN_NAME: &str = "<stdin>";

/// Where a document's text comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// A plain-text file, read when the batch runs
    File(PathBuf),
    /// Text already in memory (standard input)
    Inline { name: String, text: String },
}

impl Source {
    /// Map command-line paths to sources. `-` means standard input, which is
    /// read once through `read_stdin` no matter how often it appears.
    pub fn from_args<F>(paths: &[PathBuf], read_stdin: F) -> Result<Vec<Source>>
    where
        F: FnOnce() -> Result<String>,
    {
        let mut read_stdin = Some(read_stdin);
        let mut stdin_text: Option<String> = None;
        let mut sources = Vec::with_capacity(paths.len());

        for path in paths {
            if path.as_os_str() != "-" {
                sources.push(Source::File(path.clone()));
                continue;
            }
            if stdin_text.is_none() {
                if let Some(read) = read_stdin.take() {
                    stdin_text = Some(read().context("Failed to read standard input")?);
                }
            }
            sources.push(Source::Inline {
                name: STDIN_NAME.to_string(),
                text: stdin_text.clone().unwrap_or_default(),
            });
        }

        Ok(sources)
    }

    pub fn name(&self) -> String {
        match self {
            Source::File(path) => path.display().to_string(),
            Source::Inline { name, .. } => name.clone(),
        }
    }

    async fn read(&self) -> Result<String> {
        match self {
            Source::File(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display())),
            Source::Inline { text, .. } => Ok(text.clone()),
        }
    }
}

/// The similarity report for one document in a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentReport {
    /// Where the document came from (file path as given, or "<stdin>")
    pub source: String,
    #[serde(flatten)]
    pub report: SimilarityReport,
}

/// Read and score a single document.
pub async fn score_source(source: &Source, scorer: Arc<dyn DocumentScorer>) -> Result<DocumentReport> {
    let text = source.read().await?;

    let report = tokio::task::spawn_blocking(move || scorer.score(&text))
        .await
        .context("Scoring task panicked")?;

    Ok(DocumentReport {
        source: source.name(),
        report,
    })
}

/// Read and score a single file.
pub async fn score_file(path: &Path, scorer: Arc<dyn DocumentScorer>) -> Result<DocumentReport> {
    score_source(&Source::File(path.to_path_buf()), scorer).await
}

/// Score every source, at most `concurrency` at a time.
///
/// Returns reports in the same order as `sources`, minus any that failed.
pub async fn run(
    sources: &[Source],
    scorer: Arc<dyn DocumentScorer>,
    concurrency: usize,
) -> Result<Vec<DocumentReport>> {
    info!(documents = sources.len(), concurrency, "Starting batch scoring");

    let pb = ProgressBar::new(sources.len() as u64);
    pb.set_style(ProgressStyle::default_bar().template("  Scoring [{bar:30}] {pos}/{len} ({eta})")?);

    let results: Vec<(usize, Result<DocumentReport>)> =
        stream::iter(sources.iter().enumerate().map(|(i, source)| {
            let scorer = Arc::clone(&scorer);
            let pb = pb.clone();
            async move {
                let result = score_source(source, scorer).await;
                pb.inc(1);
                (i, result)
            }
        }))
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    pb.finish_and_clear();

    let mut ordered = results;
    ordered.sort_by_key(|(i, _)| *i);

    let mut reports = Vec::with_capacity(ordered.len());
    for (i, result) in ordered {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                warn!(source = %sources[i].name(), error = %e, "Failed to score document, skipping");
            }
        }
    }

    info!(
        scored = reports.len(),
        skipped = sources.len() - reports.len(),
        "Batch scoring complete"
    );

    Ok(reports)
}
