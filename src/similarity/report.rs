// SimilarityReport — the result of one intrinsic scoring call.
//
// Field names are part of the JSON output and stay snake_case exactly as
// written here.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::units::extract_units;

/// Aggregate score plus the unit pairs that crossed the threshold.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimilarityReport {
    /// Mean pairwise similarity as a percentage (0-100, two decimals)
    pub similarity_score: f64,
    /// Pairs above the threshold, ordered by (i, j)
    pub similar_pairs: Vec<SimilarPair>,
}

/// Two units whose similarity exceeded the flagging threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarPair {
    pub sentence_1: String,
    pub sentence_2: String,
    /// Cosine similarity rounded to two decimals.
    ///
    /// The threshold is applied to the unrounded value, so a pair just above
    /// it (0.7001 against 0.7) is reported and may display as the threshold
    /// itself. A pair exactly at the threshold is never reported.
    pub similarity: f64,
}

/// A retained unit and whether it takes part in any similar pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedUnit {
    pub line: usize,
    pub text: String,
    pub flagged: bool,
}

impl SimilarityReport {
    /// The degenerate result: fewer than two units to compare.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_pairs(&self) -> bool {
        !self.similar_pairs.is_empty()
    }

    /// Unit texts that appear on either side of at least one pair.
    pub fn flagged_units(&self) -> HashSet<&str> {
        self.similar_pairs
            .iter()
            .flat_map(|p| [p.sentence_1.as_str(), p.sentence_2.as_str()])
            .collect()
    }
}

/// Re-extract the units of `document` and mark the ones `report` flagged.
///
/// `min_chars` must match the cutoff the report was scored with, otherwise the
/// unit list won't line up with what was compared.
pub fn annotate(document: &str, report: &SimilarityReport, min_chars: usize) -> Vec<AnnotatedUnit> {
    let flagged = report.flagged_units();
    extract_units(document, min_chars)
        .into_iter()
        .map(|unit| AnnotatedUnit {
            flagged: flagged.contains(unit.text.as_str()),
            line: unit.line,
            text: unit.text,
        })
        .collect()
}
