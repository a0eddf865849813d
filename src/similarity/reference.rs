// Reference comparison — does a text closely match any known source?
//
// The text and all references are vectorized together (TF-IDF, English stop
// words removed), then the text is compared against each reference. A single
// reference above the threshold is enough to flag the text.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::cosine::cosine_similarity;
use super::round2;
use super::tokenize::Tokenizer;
use super::vectorize::{VectorSpace, Weighting};

/// The text is flagged when its best match is strictly above this.
pub const DEFAULT_REFERENCE_THRESHOLD: f64 = 0.8;

/// Outcome of comparing one text against a set of references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceReport {
    /// Similarity to each reference, in the order given (two decimals)
    pub similarities: Vec<f64>,
    /// Highest similarity across all references (two decimals)
    pub max_similarity: f64,
    /// Index of the closest reference, if any similarity is above zero
    pub best_match: Option<usize>,
    /// Whether the best match exceeded the threshold
    pub flagged: bool,
}

/// Compares a text against reference texts.
pub struct ReferenceChecker {
    /// Similarity the best match must exceed to flag the text (default 0.8)
    pub threshold: f64,
    tokenizer: Tokenizer,
}

impl Default for ReferenceChecker {
    fn default() -> Self {
        Self::new(DEFAULT_REFERENCE_THRESHOLD)
    }
}

impl ReferenceChecker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            tokenizer: Tokenizer::english(),
        }
    }

    /// Compare `text` against every reference.
    ///
    /// Fails if `references` is empty: there is nothing to compare against.
    pub fn check<S: AsRef<str>>(&self, text: &str, references: &[S]) -> Result<ReferenceReport> {
        if references.is_empty() {
            anyhow::bail!("No reference texts given — cannot run a reference comparison");
        }

        let mut corpus: Vec<&str> = references.iter().map(|r| r.as_ref()).collect();
        corpus.push(text);

        let space = VectorSpace::build(&corpus, &self.tokenizer, Weighting::TfIdf);
        let Some((target, refs)) = space.vectors.split_last() else {
            anyhow::bail!("Vectorizer produced no vectors");
        };

        let raw: Vec<f64> = refs.iter().map(|r| cosine_similarity(target, r)).collect();

        let mut best: Option<(usize, f64)> = None;
        for (i, &sim) in raw.iter().enumerate() {
            if sim > 0.0 && best.map_or(true, |(_, b)| sim > b) {
                best = Some((i, sim));
            }
        }
        let max_raw = best.map(|(_, s)| s).unwrap_or(0.0);
        let flagged = max_raw > self.threshold;

        info!(
            references = references.len(),
            vocabulary = space.vocabulary.len(),
            max_similarity = max_raw,
            flagged,
            "Compared text against references"
        );

        Ok(ReferenceReport {
            similarities: raw.into_iter().map(round2).collect(),
            max_similarity: round2(max_raw),
            best_match: best.map(|(i, _)| i),
            flagged,
        })
    }
}
