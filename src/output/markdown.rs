// Markdown report generation.
//
// Writes a self-contained report for a batch of documents: a summary table
// followed by one section per document listing its flagged line pairs.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

use crate::pipeline::batch::DocumentReport;

/// Render the report as a Markdown string.
pub fn render_report(reports: &[DocumentReport], threshold: f64) -> String {
    let mut md = String::new();
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");

    let _ = writeln!(md, "# Similarity Report\n");
    let _ = writeln!(md, "Generated {generated}. Pair threshold: {threshold:.2}.\n");

    if reports.is_empty() {
        let _ = writeln!(md, "_No documents were scored._");
        return md;
    }

    let _ = writeln!(md, "| Document | Score | Flagged pairs |");
    let _ = writeln!(md, "|---|---:|---:|");
    for doc in reports {
        let _ = writeln!(
            md,
            "| {} | {:.2}% | {} |",
            escape_cell(&doc.source),
            doc.report.similarity_score,
            doc.report.similar_pairs.len()
        );
    }

    for doc in reports {
        let _ = writeln!(md, "\n## {}\n", doc.source);
        let _ = writeln!(md, "Similarity score: **{:.2}%**\n", doc.report.similarity_score);

        if doc.report.similar_pairs.is_empty() {
            let _ = writeln!(md, "No repeated lines found.");
            continue;
        }

        for (i, pair) in doc.report.similar_pairs.iter().enumerate() {
            let _ = writeln!(md, "{}. Similarity {:.2}", i + 1, pair.similarity);
            let _ = writeln!(md, "   > {}", pair.sentence_1);
            let _ = writeln!(md, "   >");
            let _ = writeln!(md, "   > {}", pair.sentence_2);
        }
    }

    md
}

/// Render the report and write it to `path`.
pub fn generate_report(reports: &[DocumentReport], threshold: f64, path: &Path) -> Result<()> {
    let md = render_report(reports, threshold);
    std::fs::write(path, md)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    Ok(())
}

/// Pipes would break the table row.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::report::{SimilarPair, SimilarityReport};

    #[test]
    fn test_render_lists_pairs() {
        let reports = vec![DocumentReport {
            source: "essay|draft.txt".to_string(),
            report: SimilarityReport {
                similarity_score: 42.5,
                similar_pairs: vec![SimilarPair {
                    sentence_1: "first repeated line".to_string(),
                    sentence_2: "first repeated line again".to_string(),
                    similarity: 0.91,
                }],
            },
        }];

        let md = render_report(&reports, 0.7);
        assert!(md.starts_with("# Similarity Report"));
        assert!(md.contains("| essay\\|draft.txt | 42.50% | 1 |"));
        assert!(md.contains("1. Similarity 0.91"));
        assert!(md.contains("   > first repeated line again"));
    }

    #[test]
    fn test_render_empty_batch() {
        let md = render_report(&[], 0.7);
        assert!(md.contains("No documents were scored"));
    }
}
