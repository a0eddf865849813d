// Colored terminal output for similarity reports.
//
// This module handles all terminal-specific formatting: colors, tables,
// highlighting. The main.rs command handlers delegate here.

use colored::Colorize;

use crate::pipeline::batch::DocumentReport;
use crate::similarity::reference::ReferenceReport;
use crate::similarity::report::{AnnotatedUnit, SimilarityReport};

/// Display a single document's similarity report.
pub fn display_report(report: &SimilarityReport, threshold: f64) {
    println!("\n{}", "=== Intrinsic Similarity ===".bold());
    println!(
        "  Similarity score: {}",
        colorize_score(report.similarity_score)
    );

    if !report.has_pairs() {
        println!(
            "  {}",
            format!("No line pairs above {threshold:.2} similarity.").green()
        );
        return;
    }

    println!(
        "\n  {} line pairs above {:.2} similarity:\n",
        report.similar_pairs.len(),
        threshold
    );
    for (i, pair) in report.similar_pairs.iter().enumerate() {
        println!("  {:>3}. [sim: {:.2}]", i + 1, pair.similarity);
        println!("       {}", super::truncate_chars(&pair.sentence_1, 100).dimmed());
        println!("       {}", super::truncate_chars(&pair.sentence_2, 100).dimmed());
    }
}

/// Print every retained line, highlighting the ones that were flagged.
pub fn display_annotated(units: &[AnnotatedUnit]) {
    println!("\n{}", "=== Annotated Document ===".bold());
    println!();

    for unit in units {
        let line_no = format!("{:>4}", unit.line + 1).dimmed();
        if unit.flagged {
            println!("  {} {}", line_no, unit.text.black().on_yellow());
        } else {
            println!("  {} {}", line_no, unit.text);
        }
    }

    println!();
    println!(
        "  Legend: {} repeats another line in this document",
        "highlighted".black().on_yellow()
    );
}

/// Display the outcome of a reference comparison.
pub fn display_reference_report(report: &ReferenceReport, reference_names: &[String]) {
    println!("\n{}", "=== Reference Comparison ===".bold());
    println!();

    for (i, (name, sim)) in reference_names.iter().zip(&report.similarities).enumerate() {
        let marker = if report.best_match == Some(i) {
            "*".bold().to_string()
        } else {
            " ".to_string()
        };
        println!("  {} {:<48} {:.2}", marker, super::truncate_chars(name, 45), sim);
    }

    println!();
    let verdict = if report.flagged {
        "MATCH".red().bold()
    } else {
        "no match".green()
    };
    println!(
        "  Best similarity: {:.2}  Verdict: {}",
        report.max_similarity, verdict
    );
}

/// Display a one-line-per-document summary of a batch run.
pub fn display_batch_summary(reports: &[DocumentReport]) {
    if reports.is_empty() {
        println!("No documents were scored.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Similarity Report ({} documents) ===", reports.len()).bold()
    );
    println!();

    println!(
        "  {:<50} {:>7}  {:>5}",
        "Document".dimmed(),
        "Score".dimmed(),
        "Pairs".dimmed(),
    );
    println!("  {}", "-".repeat(66).dimmed());

    for doc in reports {
        println!(
            "  {:<50} {:>7}  {:>5}",
            super::truncate_chars(&doc.source, 47),
            colorize_score(doc.report.similarity_score),
            doc.report.similar_pairs.len(),
        );
    }
    println!();

    let flagged = reports.iter().filter(|d| d.report.has_pairs()).count();
    if flagged > 0 {
        println!(
            "  {} {} documents contain repeated lines",
            "!".bright_red(),
            flagged
        );
    }
}

/// Colorize an aggregate score: higher means more internal repetition.
fn colorize_score(score: f64) -> colored::ColoredString {
    let text = format!("{score:.2}%");
    if score >= 50.0 {
        text.red().bold()
    } else if score >= 25.0 {
        text.yellow()
    } else {
        text.green()
    }
}
